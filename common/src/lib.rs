//! Reunion Site Common Library
//!
//! CLIとWeb(WASM)で共有される型とロジック。DOMやI/Oには依存しない。

pub mod backend;
pub mod carousel;
pub mod config;
pub mod content;
pub mod countdown;
pub mod error;
pub mod forms;
pub mod gallery;
pub mod lightbox;

pub use backend::{AuthService, RecordStore, Session, User, parse_session_fragment};
pub use carousel::{CarouselConfig, CarouselState, DragPhase, TrackMetrics};
pub use config::SiteConfig;
pub use countdown::{EventSchedule, TimeLeft, time_left};
pub use error::{Error, Result, ServiceError, ValidationError};
pub use forms::{AuthMode, Attendance, Credentials, FormError, FormStatus, RsvpForm, authenticate, submit_rsvp};
pub use gallery::{Category, GalleryManifest, ImageItem, ImageLoader, ManifestEntry, label_from_path};
pub use lightbox::{Lightbox, ZoomBounds};
