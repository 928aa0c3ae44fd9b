//! Observer state, reference-frame transforms and projector factory for a sky
//! renderer.
//!
//! [`SkyCore`] ties the pieces together once per frame: it advances the
//! [`SimulationClock`](celestial_time::SimulationClock), moves the observer
//! ([`ObserverState`]), rebuilds the [`TransformSet`] between the six
//! [`FrameType`]s, and hands out [`Projector`](celestial_projection::Projector)s
//! for drawing in any of them.
//!
//! ```
//! use celestial_core::Location;
//! use celestial_sky::{
//!     Collaborators, CoreConfig, FrameType, SkyCore, SolarSystemCatalog,
//!     StaticLocationResolver,
//! };
//! use celestial_time::ManualTimeSource;
//!
//! let paris = Location::new("Paris", "Earth", 2.35, 48.85, 35.0)?;
//! let mut core = SkyCore::new(
//!     CoreConfig::default(),
//!     Box::new(SolarSystemCatalog::demo()),
//!     Box::new(ManualTimeSource::new(2_460_000.5, 0.0)),
//!     Collaborators::headless(Box::new(StaticLocationResolver::new(paris))),
//! );
//! core.init();
//! core.update(0.016)?;
//!
//! let north_pole = core.equinox_equ_to_j2000(celestial_core::Vector3::z_axis());
//! let projector = core.projection(FrameType::J2000);
//! let _ = projector.project(north_pole);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod body;
pub mod catalog;
pub mod collaborators;
pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod frames;
pub mod geodesic;
pub mod gps;
pub mod movement;
pub mod observer;

pub use body::{BodyCatalog, CelestialBody, RotationElements};
pub use catalog::{CircularOrbitBody, RotationModel, SolarSystemCatalog, SOLAR_SYSTEM_OBSERVER};
pub use collaborators::{
    Collaborators, FrameRenderer, Headless, LocationResolver, MovementController, NameSelection,
    SelectionProvider, SkyDrawer, StaticLocationResolver,
};
pub use config::{CoreConfig, PresetSkyTime, StartupTimeMode};
pub use self::core::{SkyCore, DEFAULT_MOVE_DURATION};
pub use error::{SkyError, SkyResult};
pub use frames::{FrameType, TransformSet};
pub use geodesic::{GeodesicGrid, GeodesicGridCache, MAX_LEVEL as GEODESIC_MAX_LEVEL};
pub use gps::GpsTracker;
pub use movement::ZoomController;
pub use observer::{HomeBody, ObserverState};
