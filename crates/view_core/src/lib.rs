//! Client-side view orchestration for the showcase: preload sequencing,
//! scroll feedback, carousel and selection transitions, and the navigation
//! guard, each publishing read-only snapshots through `tokio::sync::watch`.

pub mod carousel;
pub mod config;
pub mod cursor;
pub mod error;
pub mod navigation;
pub mod preload;
pub mod scroll;
pub mod selection;
pub mod shell;
pub mod task;
pub mod viewport;

pub use carousel::{Carousel, CarouselSnapshot};
pub use config::{load_config, MotionConfig};
pub use error::{ConfigError, ViewError};
pub use navigation::{NavState, NavigationGuard};
pub use preload::{PreloadSequencer, PreloadSnapshot, ProgressOracle, SimulatedProgress};
pub use scroll::{Parallax, ScrollFeedback, ScrollSample};
pub use selection::{SelectionSnapshot, SelectionSwap};
pub use shell::{PagePlan, PageSession, Shell};
pub use viewport::{ScrollMetrics, SimulatedViewport, Viewport};
