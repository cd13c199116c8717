pub mod addons;
pub mod carousel;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod group;
pub mod index;
pub mod slides;
pub mod timer;

pub use carousel::Carousel;
pub use config::{AppConfig, Breakpoints, CarouselOptions, ConfigResolver, OptionsPatch};
pub use engine::{CarouselEngine, Delta, SlideBounds, SlideClass};
pub use error::{Error, Result};
pub use events::{ArrowKey, CarouselEvent, Pointer};
pub use group::{GroupRegistry, HandlerId};
pub use slides::{RenderSlide, SlideDescriptor, SlideRegistry};
