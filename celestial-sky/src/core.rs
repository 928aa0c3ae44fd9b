//! The sky core: simulation clock, observer, frame transforms and projectors.
//!
//! [`SkyCore`] owns every piece of per-frame numeric state and is driven from a
//! single thread, once per rendered frame:
//!
//! 1. [`update`](SkyCore::update) advances the clock, retires a finished observer
//!    transition, moves the observer, rebuilds the [`TransformSet`], and lets the
//!    movement controller update the view and field of view.
//! 2. [`projection`](SkyCore::projection) hands out [`Projector`] snapshots for any
//!    [`FrameType`].
//! 3. [`pre_draw`](SkyCore::pre_draw) and [`post_draw`](SkyCore::post_draw)
//!    bracket the render.
//!
//! Nothing that needs an observer works before [`init`](SkyCore::init); those
//! calls return [`SkyError::NotInitialized`].

use std::sync::mpsc::Receiver;

use celestial_core::constants::DEG_TO_RAD;
use celestial_core::{Location, Matrix4, Vector3};
use celestial_projection::{
    MaskType, ModelViewTransform, ProjectionKind, Projector, ProjectorParams,
};
use celestial_time::{SimulationClock, TimeSource};

use crate::body::BodyCatalog;
use crate::catalog::SOLAR_SYSTEM_OBSERVER;
use crate::collaborators::{Collaborators, MovementController, SelectionProvider};
use crate::config::{CoreConfig, StartupTimeMode};
use crate::error::{SkyError, SkyResult};
use crate::events::LocationEvents;
use crate::frames::{self, FrameType, TransformSet};
use crate::geodesic::{GeodesicGrid, GeodesicGridCache};
use crate::gps::GpsTracker;
use crate::observer::{HomeBody, ObserverState};

/// Seconds an observer move takes unless told otherwise.
pub const DEFAULT_MOVE_DURATION: f64 = 1.0;

const TINY_FOV: f64 = 0.0001;
const Z_NEAR: f64 = 0.000001;
const Z_FAR: f64 = 50.0;

pub struct SkyCore {
    config: CoreConfig,
    catalog: Box<dyn BodyCatalog>,
    time_source: Box<dyn TimeSource>,
    collaborators: Collaborators,

    clock: SimulationClock,
    observer: Option<ObserverState>,
    transforms: TransformSet,
    altaz_model_view: Matrix4,
    params: ProjectorParams,
    projection_kind: ProjectionKind,

    default_location_id: String,
    use_gps: bool,
    gps: GpsTracker,
    preset_sky_time: f64,
    today_time: String,
    startup_time_mode: StartupTimeMode,

    events: LocationEvents,
    geodesic: GeodesicGridCache,
}

impl SkyCore {
    /// Reads the projector settings and GPS policy; everything else waits for
    /// [`init`](Self::init).
    pub fn new(
        config: CoreConfig,
        catalog: Box<dyn BodyCatalog>,
        time_source: Box<dyn TimeSource>,
        collaborators: Collaborators,
    ) -> Self {
        let params = config.projector_params();
        let use_gps = config.use_gps;
        let startup_time_mode = config.startup_time_mode();
        Self {
            default_location_id: config.default_location.clone(),
            today_time: config.today_time.clone(),
            config,
            catalog,
            time_source,
            collaborators,
            clock: SimulationClock::new(),
            observer: None,
            transforms: TransformSet::default(),
            altaz_model_view: Matrix4::identity(),
            params,
            projection_kind: ProjectionKind::default(),
            use_gps,
            gps: GpsTracker::new(),
            preset_sky_time: celestial_core::constants::J2000_JD,
            startup_time_mode,
            events: LocationEvents::new(),
            geodesic: GeodesicGridCache::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.observer.is_some()
    }

    /// Places the observer at the default location, sets the clock according to
    /// the startup mode, computes the first transform set and selects the
    /// configured projection.
    pub fn init(&mut self) {
        let resolver = &self.collaborators.locations;
        let location = resolver
            .location_for_string(&self.default_location_id)
            .unwrap_or_else(|| {
                log::warn!("location {:?} is unknown", self.default_location_id);
                resolver.default_location()
            });
        self.observer = Some(ObserverState::stationary(location, self.catalog.as_ref()));

        self.clock.set_to_now(self.time_source.as_ref());

        self.preset_sky_time = self.config.preset_sky_time.resolve().unwrap_or_else(|err| {
            log::warn!("{}; using J2000.0", err);
            celestial_core::constants::J2000_JD
        });
        match self.startup_time_mode {
            StartupTimeMode::Preset => self
                .clock
                .set_to_preset(self.time_source.as_ref(), self.preset_sky_time),
            StartupTimeMode::Today => {
                self.clock
                    .set_to_today(self.time_source.as_ref(), &self.today_time);
            }
            StartupTimeMode::Actual => {}
        }

        self.update_transform_matrices();

        self.params.fov = self.collaborators.movement.init_fov();
        let projection_type = self.config.projection_type.clone();
        self.set_current_projection_type_key(&projection_type);
        log::info!(
            "sky core ready at {} (JD {:.5}), projection {}",
            self.observer.as_ref().map_or("?", |o| o.location().name.as_str()),
            self.clock.jd(),
            self.projection_kind.key()
        );
    }

    /// Advances the simulation by `dt` seconds of real time.
    pub fn update(&mut self, dt: f64) -> SkyResult<()> {
        self.update_time(dt)?;
        self.update_transform_matrices();

        self.collaborators.movement.update_motion(dt);
        let (direction, up) = self.collaborators.movement.view_j2000(&self.transforms);
        if let Err(err) = self.look_at_j2000(direction, up) {
            log::debug!("keeping previous view: {}", err);
        }
        self.params.fov = self.collaborators.movement.current_fov();

        self.collaborators.sky_drawer.update(dt);
        Ok(())
    }

    fn update_time(&mut self, dt: f64) -> SkyResult<()> {
        self.clock.advance(dt);

        let observer = self.observer.as_mut().ok_or(SkyError::NotInitialized)?;
        if observer.is_life_over() {
            let outgoing = observer.home_body();
            let selection = &mut self.collaborators.selection;
            if selection.selected_object().as_deref() == Some(outgoing.english_name()) {
                selection.unselect();
            }
            *observer = observer.successor();
            log::debug!("observer arrived at {}", observer.location());
        }
        observer.update(dt);
        Ok(())
    }

    fn update_transform_matrices(&mut self) {
        if let Some(observer) = &self.observer {
            self.transforms = TransformSet::compute(self.clock.jd(), observer);
        }
    }

    pub fn observer(&self) -> SkyResult<&ObserverState> {
        self.observer.as_ref().ok_or(SkyError::NotInitialized)
    }

    pub fn home_body(&self) -> SkyResult<HomeBody> {
        self.observer().map(ObserverState::home_body)
    }

    pub fn current_location(&self) -> SkyResult<&Location> {
        self.observer().map(ObserverState::location)
    }

    pub fn transforms(&self) -> &TransformSet {
        &self.transforms
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    // --- frames -------------------------------------------------------------

    /// Builds the alt-az model-view looking along `pos` with `up` toward the top
    /// of the screen, both given in J2000.
    ///
    /// # Errors
    ///
    /// [`SkyError::DegenerateView`] when either vector is null or they are
    /// parallel; the previous model-view is kept.
    pub fn look_at_j2000(&mut self, pos: Vector3, up: Vector3) -> SkyResult<()> {
        let f = self
            .transforms
            .j2000_to_altaz
            .transform_direction(pos)
            .try_normalize()
            .map_err(|_| SkyError::degenerate_view("null view direction"))?;
        let up = self
            .transforms
            .j2000_to_altaz
            .transform_direction(up)
            .try_normalize()
            .map_err(|_| SkyError::degenerate_view("null up vector"))?;
        let s = f
            .cross(&up)
            .try_normalize()
            .map_err(|_| SkyError::degenerate_view("view direction parallel to up vector"))?;
        let u = s.cross(&f).normalize();

        self.altaz_model_view = Matrix4::from_rows([
            [s.x, s.y, s.z, 0.0],
            [u.x, u.y, u.z, 0.0],
            [-f.x, -f.y, -f.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        Ok(())
    }

    pub fn model_view(&self, frame: FrameType) -> ModelViewTransform {
        ModelViewTransform::new(self.transforms.model_view(frame, &self.altaz_model_view))
    }

    pub fn altaz_model_view(&self) -> ModelViewTransform {
        self.model_view(FrameType::AltAz)
    }

    pub fn heliocentric_ecliptic_model_view(&self) -> ModelViewTransform {
        self.model_view(FrameType::HeliocentricEcliptic)
    }

    pub fn observercentric_ecliptic_model_view(&self) -> ModelViewTransform {
        self.model_view(FrameType::ObservercentricEcliptic)
    }

    pub fn equinox_equ_model_view(&self) -> ModelViewTransform {
        self.model_view(FrameType::EquinoxEqu)
    }

    pub fn j2000_model_view(&self) -> ModelViewTransform {
        self.model_view(FrameType::J2000)
    }

    pub fn galactic_model_view(&self) -> ModelViewTransform {
        self.model_view(FrameType::Galactic)
    }

    /// Projector for drawing in `frame` with the current projection type.
    pub fn projection(&self, frame: FrameType) -> Projector {
        self.projection_with(self.model_view(frame), self.projection_kind)
    }

    /// Projector for a frame given by its key, e.g. `"FrameJ2000"`.
    pub fn projection_for_key(&self, frame_key: &str) -> SkyResult<Projector> {
        Ok(self.projection(FrameType::from_key(frame_key)?))
    }

    pub fn projection_with(&self, model_view: ModelViewTransform, kind: ProjectionKind) -> Projector {
        Projector::new(kind, model_view, &self.params)
    }

    pub fn altaz_to_equinox_equ(&self, v: Vector3) -> Vector3 {
        self.transforms.altaz_to_equinox_equ(v)
    }

    pub fn equinox_equ_to_altaz(&self, v: Vector3) -> Vector3 {
        self.transforms.equinox_equ_to_altaz(v)
    }

    pub fn altaz_to_j2000(&self, v: Vector3) -> Vector3 {
        self.transforms.altaz_to_j2000(v)
    }

    pub fn j2000_to_altaz(&self, v: Vector3) -> Vector3 {
        self.transforms.j2000_to_altaz(v)
    }

    pub fn equinox_equ_to_j2000(&self, v: Vector3) -> Vector3 {
        self.transforms.equinox_equ_to_j2000(v)
    }

    pub fn j2000_to_equinox_equ(&self, v: Vector3) -> Vector3 {
        self.transforms.j2000_to_equinox_equ(v)
    }

    pub fn heliocentric_ecliptic_to_altaz(&self, v: Vector3) -> Vector3 {
        self.transforms.heliocentric_ecliptic_to_altaz(v)
    }

    pub fn altaz_to_heliocentric_ecliptic(&self, v: Vector3) -> Vector3 {
        self.transforms.altaz_to_heliocentric_ecliptic(v)
    }

    pub fn j2000_to_galactic(&self, v: Vector3) -> Vector3 {
        frames::j2000_to_galactic().transform_point(v)
    }

    pub fn galactic_to_j2000(&self, v: Vector3) -> Vector3 {
        frames::galactic_to_j2000().transform_point(v)
    }

    pub fn j2000_to_vsop87(&self, v: Vector3) -> Vector3 {
        frames::j2000_to_vsop87().transform_point(v)
    }

    pub fn vsop87_to_j2000(&self, v: Vector3) -> Vector3 {
        frames::vsop87_to_j2000().transform_point(v)
    }

    pub fn observer_heliocentric_ecliptic_position(&self) -> Vector3 {
        self.transforms.observer_heliocentric_ecliptic_position()
    }

    // --- projection type and viewport -----------------------------------------

    pub fn current_projection_type(&self) -> ProjectionKind {
        self.projection_kind
    }

    pub fn current_projection_type_key(&self) -> &'static str {
        self.projection_kind.key()
    }

    /// Switches projection, clamping the field of view to what it can show.
    pub fn set_current_projection_type(&mut self, kind: ProjectionKind) {
        self.projection_kind = kind;
        let saved_fov = self.params.fov;
        self.params.fov = TINY_FOV;
        let unbounded = Projector::new(kind, ModelViewTransform::identity(), &self.params);
        let max_fov = unbounded.max_fov();
        self.collaborators.movement.set_max_fov(max_fov);
        self.params.fov = saved_fov.min(max_fov);
    }

    /// Unknown keys fall back to stereographic with a warning.
    pub fn set_current_projection_type_key(&mut self, key: &str) {
        self.set_current_projection_type(ProjectionKind::from_key(key));
    }

    pub fn all_projection_type_keys() -> Vec<&'static str> {
        ProjectionKind::all_keys()
    }

    pub fn projection_type_key_to_name(key: &str) -> Option<&'static str> {
        ProjectionKind::try_from_key(key).ok().map(|k| k.name())
    }

    pub fn projection_type_name_to_key(name: &str) -> Option<&'static str> {
        ProjectionKind::ALL
            .iter()
            .find(|k| k.name() == name)
            .map(|k| k.key())
    }

    pub fn projector_params(&self) -> &ProjectorParams {
        &self.params
    }

    pub fn set_mask_type(&mut self, mask: MaskType) {
        self.params.mask_type = mask;
    }

    pub fn set_flip_horizontal(&mut self, flip: bool) {
        self.params.flip_horizontal = flip;
    }

    pub fn set_flip_vertical(&mut self, flip: bool) {
        self.params.flip_vertical = flip;
    }

    pub fn set_gravity_labels(&mut self, gravity: bool) {
        self.params.gravity_labels = gravity;
    }

    /// The window changed: the viewport fills it again.
    pub fn window_has_been_resized(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.params.resize(x, y, width, height);
    }

    pub fn pre_draw(&mut self) {
        self.params.z_near = Z_NEAR;
        self.params.z_far = Z_FAR;
        self.collaborators.sky_drawer.pre_draw();
        self.collaborators.renderer.clear();
    }

    pub fn post_draw(&mut self) {
        let shape = self.projection(FrameType::J2000).viewport_shape();
        self.collaborators.renderer.draw_viewport_shape(&shape);
    }

    /// A grid with at least `max_level` levels, rebuilt only when deeper.
    pub fn geodesic_grid(&mut self, max_level: usize) -> &GeodesicGrid {
        self.geodesic.ensure_level(max_level)
    }

    // --- observer -------------------------------------------------------------

    /// Moves the observer to `target` over `duration` seconds, or
    /// `duration_if_body_changes` when `target` is on another body. Zero or
    /// negative durations jump straight there.
    pub fn move_observer_to(
        &mut self,
        target: Location,
        duration: f64,
        duration_if_body_changes: f64,
    ) -> SkyResult<()> {
        let observer = self.observer.as_ref().ok_or(SkyError::NotInitialized)?;
        let current = observer.location().clone();
        let d = if current.planet == target.planet {
            duration
        } else {
            duration_if_body_changes
        };

        let next = if d > 0.0 {
            let mut from = current;
            if observer.is_transitioning() {
                from.name = ".".to_string();
            }
            let mut travelling =
                ObserverState::transitioning(from, target.clone(), d, self.catalog.as_ref());
            travelling.update(0.0);
            travelling
        } else {
            ObserverState::stationary(target.clone(), self.catalog.as_ref())
        };
        self.observer = Some(next);
        self.events.publish(&target);
        Ok(())
    }

    /// Moves onto the selected body, keeping the current coordinates.
    ///
    /// Turns tracking off in every case.
    pub fn move_observer_to_selected(&mut self) -> SkyResult<()> {
        let body = self
            .collaborators
            .selection
            .selected_object()
            .and_then(|name| self.catalog.search_by_english_name(&name));
        if let Some(body) = body {
            let location = self
                .current_location()?
                .clone()
                .with_planet(body.english_name())
                .with_name("-")
                .with_region(None);
            self.move_observer_to(location, DEFAULT_MOVE_DURATION, DEFAULT_MOVE_DURATION)?;
        }
        self.collaborators.movement.set_tracking(false);
        Ok(())
    }

    /// Jumps back to the default location.
    pub fn return_to_home(&mut self) -> SkyResult<()> {
        let resolver = &self.collaborators.locations;
        let home = resolver
            .location_for_string(&self.default_location_id)
            .unwrap_or_else(|| resolver.default_location());
        self.move_observer_to(home, 0.0, DEFAULT_MOVE_DURATION)
    }

    pub fn default_location_id(&self) -> &str {
        &self.default_location_id
    }

    pub fn set_default_location_id(&mut self, id: &str) {
        if self.collaborators.locations.location_for_string(id).is_none() {
            log::warn!("default location {:?} is unknown", id);
        }
        self.default_location_id = id.to_string();
        self.config.default_location = id.to_string();
    }

    pub fn use_gps(&self) -> bool {
        self.use_gps
    }

    /// Enabling moves to the last GPS fix, if there is one.
    pub fn set_use_gps(&mut self, use_gps: bool) -> SkyResult<()> {
        self.use_gps = use_gps;
        self.config.use_gps = use_gps;
        if let Some(fix) = self.gps.last_fix().filter(|_| use_gps).cloned() {
            self.move_observer_to(fix, DEFAULT_MOVE_DURATION, DEFAULT_MOVE_DURATION)?;
        }
        Ok(())
    }

    /// Feeds a GPS fix, in degrees. Returns whether it was far enough from the
    /// previous fix to be kept.
    pub fn set_gps_location(&mut self, longitude: f64, latitude: f64) -> SkyResult<bool> {
        log::debug!(
            "GPS fix {}, {} (following: {})",
            longitude,
            latitude,
            self.use_gps
        );
        match self.gps.accept_fix(longitude, latitude)? {
            Some(location) => {
                if self.use_gps {
                    self.move_observer_to(location, DEFAULT_MOVE_DURATION, DEFAULT_MOVE_DURATION)?;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn last_gps_location(&self) -> Option<&Location> {
        self.gps.last_fix()
    }

    pub fn subscribe_location_changes(&mut self) -> Receiver<Location> {
        self.events.subscribe()
    }

    // --- time -----------------------------------------------------------------

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn jd(&self) -> f64 {
        self.clock.jd()
    }

    pub fn set_jd(&mut self, jd: f64) {
        self.clock.set_instant(jd);
    }

    pub fn time_rate(&self) -> f64 {
        self.clock.rate()
    }

    pub fn set_time_rate(&mut self, rate: f64) {
        self.clock.set_rate(rate);
    }

    pub fn increase_time_speed(&mut self) {
        self.clock.increase_speed();
    }

    pub fn decrease_time_speed(&mut self) {
        self.clock.decrease_speed();
    }

    pub fn increase_time_speed_less(&mut self) {
        self.clock.increase_speed_less();
    }

    pub fn decrease_time_speed_less(&mut self) {
        self.clock.decrease_speed_less();
    }

    pub fn set_time_now(&mut self) {
        self.clock.set_to_now(self.time_source.as_ref());
    }

    pub fn is_time_now(&self) -> bool {
        self.clock.is_now(self.time_source.as_ref())
    }

    /// Today's date at `time_of_day` (`"HH:MM[:SS]"`, local time). Falls back to
    /// now when the time cannot be read.
    pub fn set_today_time(&mut self, time_of_day: &str) -> bool {
        self.clock.set_to_today(self.time_source.as_ref(), time_of_day)
    }

    pub fn init_today_time(&self) -> &str {
        &self.today_time
    }

    pub fn set_init_today_time(&mut self, time_of_day: &str) {
        self.today_time = time_of_day.to_string();
    }

    pub fn preset_sky_time(&self) -> f64 {
        self.preset_sky_time
    }

    pub fn set_preset_sky_time(&mut self, jd: f64) {
        self.preset_sky_time = jd;
    }

    /// Sets the preset from a local calendar date and time.
    pub fn set_preset_sky_time_from(&mut self, datetime: &celestial_time::ParsedDateTime) {
        self.preset_sky_time = datetime.to_julian_date().to_f64();
    }

    /// Jumps to the preset instant, read as local civil time.
    pub fn set_time_to_preset(&mut self) {
        self.clock
            .set_to_preset(self.time_source.as_ref(), self.preset_sky_time);
    }

    pub fn startup_time_mode(&self) -> StartupTimeMode {
        self.startup_time_mode
    }

    pub fn set_startup_time_mode(&mut self, mode: StartupTimeMode) {
        self.startup_time_mode = mode;
        self.config.startup_time_mode = mode.key().to_string();
    }

    pub fn add_solar_days(&mut self, days: f64) {
        self.clock.add_solar_days(days);
    }

    /// Advances by sidereal days of the home body; on the barycentric
    /// pseudo-body a sidereal day is a solar day.
    pub fn add_sidereal_days(&mut self, days: f64) -> SkyResult<()> {
        let home = self.home_body()?;
        let days = if home.english_name() != SOLAR_SYSTEM_OBSERVER {
            days * home.sidereal_day()
        } else {
            days
        };
        self.clock.add_solar_days(days);
        Ok(())
    }

    /// Local sidereal time in radians.
    pub fn local_sidereal_time(&self) -> SkyResult<f64> {
        let observer = self.observer()?;
        let st = observer.home_body().sidereal_time(self.clock.jd());
        Ok((st + observer.location().longitude) * DEG_TO_RAD)
    }

    /// Length of the home body's sidereal day, in days.
    pub fn local_sidereal_day_length(&self) -> SkyResult<f64> {
        Ok(self.home_body()?.sidereal_day())
    }

    pub fn selection(&self) -> &dyn SelectionProvider {
        self.collaborators.selection.as_ref()
    }

    pub fn movement(&self) -> &dyn MovementController {
        self.collaborators.movement.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SolarSystemCatalog;
    use crate::collaborators::StaticLocationResolver;
    use celestial_core::constants::J2000_JD;
    use celestial_time::constants::JD_SECOND;
    use celestial_time::ManualTimeSource;

    fn paris() -> Location {
        Location::new("Paris", "Earth", 2.35, 48.85, 35.0)
            .unwrap()
            .with_region(Some("France"))
    }

    fn core_with(config: CoreConfig, wall: &ManualTimeSource) -> SkyCore {
        let resolver = StaticLocationResolver::new(paris());
        SkyCore::new(
            config,
            Box::new(SolarSystemCatalog::demo()),
            Box::new(wall.clone()),
            Collaborators::headless(Box::new(resolver)),
        )
    }

    fn ready_core() -> SkyCore {
        let config = CoreConfig {
            default_location: "Paris, France".into(),
            ..CoreConfig::default()
        };
        let mut core = core_with(config, &ManualTimeSource::new(J2000_JD + 100.0, 0.0));
        core.init();
        core
    }

    #[test]
    fn test_uninitialized_calls_fail() {
        let mut core = core_with(CoreConfig::default(), &ManualTimeSource::new(J2000_JD, 0.0));
        assert!(!core.is_ready());
        assert!(matches!(core.update(0.1), Err(SkyError::NotInitialized)));
        assert!(matches!(core.current_location(), Err(SkyError::NotInitialized)));
        assert!(matches!(
            core.move_observer_to(paris(), 0.0, 0.0),
            Err(SkyError::NotInitialized)
        ));
    }

    #[test]
    fn test_unknown_default_location_uses_resolver_default() {
        let mut core = core_with(CoreConfig::default(), &ManualTimeSource::new(J2000_JD, 0.0));
        core.init();
        assert!(core.is_ready());
        assert_eq!(core.current_location().unwrap().name, "Paris");
    }

    #[test]
    fn test_startup_modes() {
        let wall = ManualTimeSource::new(2_460_000.3, 2.0);

        let mut actual = core_with(CoreConfig::default(), &wall);
        actual.init();
        assert_eq!(actual.jd(), 2_460_000.3);

        let preset = CoreConfig {
            startup_time_mode: "preset".into(),
            preset_sky_time: crate::config::PresetSkyTime::JulianDay(2_451_545.5),
            ..CoreConfig::default()
        };
        let mut core = core_with(preset, &wall);
        core.init();
        assert!((core.jd() - (2_451_545.5 - 2.0 / 24.0)).abs() < 1e-9);

        let today = CoreConfig {
            startup_time_mode: "today".into(),
            today_time: "not a time".into(),
            ..CoreConfig::default()
        };
        let mut core = core_with(today, &wall);
        core.init();
        assert_eq!(core.jd(), 2_460_000.3);
    }

    #[test]
    fn test_bad_preset_falls_back_to_j2000() {
        let config = CoreConfig {
            startup_time_mode: "preset".into(),
            preset_sky_time: crate::config::PresetSkyTime::Text("someday".into()),
            ..CoreConfig::default()
        };
        let mut core = core_with(config, &ManualTimeSource::new(2_460_000.0, 0.0));
        core.init();
        assert_eq!(core.preset_sky_time(), J2000_JD);
        assert_eq!(core.jd(), J2000_JD);
    }

    #[test]
    fn test_projection_type_clamps_fov() {
        let mut core = ready_core();
        core.set_current_projection_type(ProjectionKind::Fisheye);
        core.params.fov = 200.0;
        core.set_current_projection_type(ProjectionKind::Perspective);
        assert_eq!(core.projector_params().fov, ProjectionKind::Perspective.max_fov());
        assert_eq!(core.current_projection_type_key(), "ProjectionPerspective");

        core.set_current_projection_type_key("no_such_projection");
        assert_eq!(core.current_projection_type(), ProjectionKind::Stereographic);
    }

    #[test]
    fn test_projection_key_name_mapping() {
        assert_eq!(SkyCore::all_projection_type_keys().len(), 8);
        let name = SkyCore::projection_type_key_to_name("ProjectionHammer").unwrap();
        assert_eq!(SkyCore::projection_type_name_to_key(name), Some("ProjectionHammer"));
        assert_eq!(SkyCore::projection_type_key_to_name("ProjectionBogus"), None);
    }

    #[test]
    fn test_look_at_puts_target_in_center() {
        let mut core = ready_core();
        let target = Vector3::new(0.2, 0.5, 0.8).normalize();
        let up = core.altaz_to_j2000(Vector3::z_axis());
        core.look_at_j2000(target, up).unwrap();
        core.window_has_been_resized(0, 0, 800, 600);
        let point = core.projection(FrameType::J2000).project(target).unwrap();
        assert!((point.x - 400.0).abs() < 1e-9);
        assert!((point.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_look_at_rejects_parallel_up() {
        let mut core = ready_core();
        let before = core.altaz_model_view();
        let err = core.look_at_j2000(Vector3::z_axis(), Vector3::z_axis() * 2.0);
        assert!(matches!(err, Err(SkyError::DegenerateView { .. })));
        assert_eq!(core.altaz_model_view(), before);
    }

    #[test]
    fn test_pre_draw_sets_clip_planes() {
        let mut core = ready_core();
        core.pre_draw();
        assert_eq!(core.projector_params().z_near, 0.000001);
        assert_eq!(core.projector_params().z_far, 50.0);
        core.post_draw();
    }

    #[test]
    fn test_resize_resets_viewport() {
        let mut core = ready_core();
        core.window_has_been_resized(10, 20, 300, 200);
        let params = core.projector_params();
        assert_eq!(params.viewport_center, (160.0, 120.0));
        assert_eq!(params.fov_diameter, 200.0);
    }

    #[test]
    fn test_add_sidereal_days_on_earth() {
        let mut core = ready_core();
        let start = core.jd();
        core.add_sidereal_days(2.0).unwrap();
        let expected = 2.0 * core.local_sidereal_day_length().unwrap();
        assert!((core.jd() - start - expected).abs() < 1e-9);
    }

    #[test]
    fn test_add_sidereal_days_at_barycentre_is_solar() {
        let mut core = ready_core();
        let sso = Location::new("Here", SOLAR_SYSTEM_OBSERVER, 0.0, 0.0, 0.0).unwrap();
        core.move_observer_to(sso, 0.0, 0.0).unwrap();
        let start = core.jd();
        core.add_sidereal_days(3.0).unwrap();
        assert!((core.jd() - start - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_local_sidereal_time_includes_longitude() {
        let core = ready_core();
        let lst = core.local_sidereal_time().unwrap();
        let earth_st = crate::catalog::earth_rotation_angle(core.jd());
        assert!((lst - (earth_st + 2.35) * DEG_TO_RAD).abs() < 1e-12);
    }

    #[test]
    fn test_time_speed_wrappers() {
        let mut core = ready_core();
        core.set_time_rate(0.0);
        core.increase_time_speed();
        assert_eq!(core.time_rate(), JD_SECOND);
        core.decrease_time_speed();
        assert_eq!(core.time_rate(), 0.0);
        core.set_time_now();
        assert!(core.is_time_now());
    }

    #[test]
    fn test_geodesic_grid_cache() {
        let mut core = ready_core();
        assert_eq!(core.geodesic_grid(1).max_level(), 1);
        assert_eq!(core.geodesic_grid(0).max_level(), 1);
    }

    #[test]
    fn test_set_default_location_id() {
        let mut core = ready_core();
        core.set_default_location_id("Nowhere");
        assert_eq!(core.default_location_id(), "Nowhere");
        assert_eq!(core.config().default_location, "Nowhere");
    }
}
