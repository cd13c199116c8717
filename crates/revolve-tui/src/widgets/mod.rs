mod carousel;
mod navigation;
mod pagination;
mod progress;
mod status_bar;

pub use carousel::CarouselWidget;
pub use navigation::NavigationWidget;
pub use pagination::PaginationWidget;
pub use progress::ProgressWidget;
pub use status_bar::StatusBarWidget;
