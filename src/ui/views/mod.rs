//! Application views (tab contents).

mod detail;
mod list;

pub use detail::DetailView;
pub use list::ListView;
