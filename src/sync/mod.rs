//! Configuration sync controller
//!
//! [`ConfigSync`] sits between the UI and the pads. Edits are applied to a copy
//! of each targeted pad's configuration, committed to the [`ConfigStore`] and
//! written to the device. Every edit posts one [`ConfigChanged`] event, and
//! [`ConfigSync::dispatch`] later refreshes the registered observers from it.
//!
//! Observers set widget values while they refresh, and widgets answer value
//! changes with edits. All methods take `&self`, so an observer may call back
//! into the controller; edits made during a refresh are suppressed.
//!
//! # Usage
//!
//! ```ignore
//! static CHANGES: ChangeChannel<8> = ChangeChannel::new();
//!
//! let sync = ConfigSync::new(device, settings, &CHANGES, &SyncConfig::default());
//! sync.notify_device_changed(PadSet::ALL);
//!
//! loop {
//!     sync.dispatch(&mut [&mut thresholds_page, &mut colors_page]);
//!     sync.poll_lights(Instant::now());
//! }
//! ```

mod guard;

pub use guard::{ExternalUpdateFlag, ExternalUpdateGuard};

use core::cell::RefCell;

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::PadDevice;
use crate::color::{HueSelection, Rgb, hue_selection};
use crate::config::{ConfigStore, PANEL_COUNT, PadConfig};
use crate::error::{Error, Result};
use crate::events::{ChangeChannel, ConfigChanged, DEFAULT_CHANGE_CHANNEL_SIZE};
use crate::light_batcher::{DEFAULT_LIGHT_DELAY, LightCommandBatcher};
use crate::pad::{ActivePadSelection, PadIndex, PadSet};
use crate::settings::{SensorGroupSettings, SettingsStore};
use crate::threshold::{
    SensorGroup, SensorSet, SliderKind, ThresholdGroupResolver, definition, encode,
};
use crate::view::{LevelReading, SensorTestData, SliderState};

/// Sliders whose sensors are kept at one shared value
///
/// Cardinal and corner sliders span several panel sliders and are left out.
const SYNCED_SLIDERS: [SliderKind; 12] = [
    SliderKind::Panel(0),
    SliderKind::Panel(1),
    SliderKind::Panel(2),
    SliderKind::Panel(3),
    SliderKind::Panel(4),
    SliderKind::Panel(5),
    SliderKind::Panel(6),
    SliderKind::Panel(7),
    SliderKind::Panel(8),
    SliderKind::InnerSensors,
    SliderKind::OuterSensors,
    SliderKind::CustomSensors,
];

fn panel_exists(panel: u8) -> bool {
    usize::from(panel) < PANEL_COUNT
}

/// Configuration for the sync controller
#[derive(Debug, Clone, Copy)]
pub struct SyncConfig {
    /// Delay between the first floor color edit and the light strip write
    pub light_delay: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            light_delay: DEFAULT_LIGHT_DELAY,
        }
    }
}

/// Where a color edit lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    /// Step color of one panel
    Panel { pad: PadIndex, panel: u8 },
    /// Floor light strip
    Floor { pad: PadIndex },
}

impl ColorTarget {
    pub const fn pad(self) -> PadIndex {
        match self {
            Self::Panel { pad, .. } | Self::Floor { pad } => pad,
        }
    }
}

/// Pads an edit was written to, and pads it had to skip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditReport {
    pub applied: PadSet,
    /// Pads that dropped off before or during the write
    pub skipped: PadSet,
}

/// Result of an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied(EditReport),
    /// Observers were being refreshed; nothing was touched
    Suppressed,
    /// The edit had nothing to write on any targeted pad
    Inactive,
}

impl EditOutcome {
    pub const fn report(self) -> Option<EditReport> {
        match self {
            Self::Applied(report) => Some(report),
            Self::Suppressed | Self::Inactive => None,
        }
    }

    pub const fn is_suppressed(self) -> bool {
        matches!(self, Self::Suppressed)
    }
}

/// UI component that mirrors part of the configuration
pub trait ConfigObserver<D, S, const EVENTS: usize> {
    /// Reload widget values after a change
    ///
    /// Edits made through `sync` from here are suppressed.
    fn load_from_config(&mut self, sync: &ConfigSync<'_, D, S, EVENTS>, event: ConfigChanged);
}

/// Keeps the pads, the store and the observers in step
pub struct ConfigSync<'a, D, S, const EVENTS: usize = DEFAULT_CHANGE_CHANNEL_SIZE> {
    // External dependencies
    device: RefCell<D>,
    settings: RefCell<S>,
    changes: &'a ChangeChannel<EVENTS>,

    // Internal state
    store: RefCell<ConfigStore>,
    lights: RefCell<LightCommandBatcher>,
    external_update: ExternalUpdateFlag,
}

impl<'a, D, S, const EVENTS: usize> ConfigSync<'a, D, S, EVENTS>
where
    D: PadDevice,
    S: SettingsStore,
{
    /// Create a controller with an empty store
    ///
    /// Call [`Self::notify_device_changed`] or [`Self::refresh_from_device`]
    /// to load the connected pads.
    pub fn new(
        device: D,
        settings: S,
        changes: &'a ChangeChannel<EVENTS>,
        config: &SyncConfig,
    ) -> Self {
        Self {
            device: RefCell::new(device),
            settings: RefCell::new(settings),
            changes,
            store: RefCell::new(ConfigStore::new()),
            lights: RefCell::new(LightCommandBatcher::with_delay(config.light_delay)),
            external_update: ExternalUpdateFlag::new(),
        }
    }

    /// Run `f` with the device collaborator
    pub fn with_device<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        f(&mut self.device.borrow_mut())
    }

    /// Run `f` with the settings collaborator
    pub fn with_settings<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.settings.borrow_mut())
    }

    /// Whether observers are being refreshed right now
    pub fn is_external_update(&self) -> bool {
        self.external_update.is_set()
    }

    // ---- Edits ----

    /// Set the low/high thresholds of every sensor a slider controls
    ///
    /// The pair is constrained per pad, since pads may use different sensor
    /// technologies.
    pub fn apply_threshold(
        &self,
        kind: SliderKind,
        lower: u8,
        upper: u8,
        selection: ActivePadSelection,
    ) -> EditOutcome {
        self.edit_active_pads(selection, |config, groups| {
            let technology = config.technology;
            let resolver = ThresholdGroupResolver::new(groups, technology);
            if !resolver.is_active(kind) {
                return false;
            }
            let sensors = resolver.resolve(kind, config.has_all_panels(), false);
            if sensors.is_empty() {
                return false;
            }
            let range = definition(technology).constrain(lower, upper);
            let raw = encode(range.lower, range.upper);
            for sensor in sensors.iter() {
                config.panels[usize::from(sensor.panel)]
                    .set_raw_threshold(technology, sensor.sensor, raw.low, raw.high);
            }
            true
        })
    }

    /// Enable or disable whole panels
    pub fn set_enabled_panels(
        &self,
        enabled: [bool; PANEL_COUNT],
        selection: ActivePadSelection,
    ) -> EditOutcome {
        self.edit_active_pads(selection, |config, _| {
            config.enabled_sensors = config.enabled_sensors.with_enabled_panels(enabled);
            config.refresh_auto_light_panel_mask(false);
            true
        })
    }

    pub fn set_light_all_panels(
        &self,
        enabled: bool,
        selection: ActivePadSelection,
    ) -> EditOutcome {
        self.edit_active_pads(selection, |config, _| {
            config.set_light_all_panels(enabled);
            true
        })
    }

    /// Enable or disable the upward-facing sensor of the center panel
    ///
    /// Only FSR pads have per-sensor thresholds; load-cell pads are left alone.
    pub fn set_center_top_sensor(
        &self,
        enabled: bool,
        selection: ActivePadSelection,
    ) -> EditOutcome {
        self.edit_active_pads(selection, |config, _| {
            if !config.is_fsr() {
                return false;
            }
            config.set_center_top_sensor(enabled);
            true
        })
    }

    /// Change a panel color or a floor color
    ///
    /// Floor colors are also queued as a light strip write, flushed by
    /// [`Self::poll_lights`].
    pub fn set_color(&self, target: ColorTarget, color: Rgb, now: Instant) -> EditOutcome {
        match target {
            ColorTarget::Panel { pad, panel } => self.edit_active_pads(pad.into(), |config, _| {
                if !panel_exists(panel) || !config.enabled_sensors.panel_enabled(panel) {
                    return false;
                }
                config.set_step_color(panel, color);
                true
            }),
            ColorTarget::Floor { pad } => {
                let outcome = self.edit_active_pads(pad.into(), |config, _| {
                    if !config.is_new_gen() {
                        return false;
                    }
                    config.set_platform_strip_color(color);
                    true
                });
                if matches!(outcome, EditOutcome::Applied(report) if report.applied.contains(pad)) {
                    self.lights.borrow_mut().request_color_write(pad, color, now);
                }
                outcome
            }
        }
    }

    /// Switch the inner or outer sensor slider on or off
    pub fn set_group_enabled(
        &self,
        group: SensorGroup,
        enabled: bool,
        selection: ActivePadSelection,
    ) -> EditOutcome {
        if self.external_update.is_set() {
            return EditOutcome::Suppressed;
        }
        self.settings.borrow_mut().set_bool(group.setting_key(), enabled);
        self.changes.post(ConfigChanged::settings_changed());
        self.settings_applied(selection)
    }

    /// Replace the sensors of the custom slider
    pub fn set_custom_sensors(
        &self,
        sensors: &SensorSet,
        selection: ActivePadSelection,
    ) -> EditOutcome {
        if self.external_update.is_set() {
            return EditOutcome::Suppressed;
        }
        self.settings.borrow_mut().set_custom_sensors(sensors);
        self.changes.post(ConfigChanged::settings_changed());
        self.settings_applied(selection)
    }

    /// Resync thresholds after a settings edit
    ///
    /// The setting itself is already saved, so the edit counts as applied even
    /// when no pad needed a write.
    fn settings_applied(&self, selection: ActivePadSelection) -> EditOutcome {
        match self.sync_slider_thresholds(selection) {
            EditOutcome::Inactive => EditOutcome::Applied(EditReport::default()),
            outcome => outcome,
        }
    }

    /// Give every sensor of each active slider the value of its first sensor
    ///
    /// Slider membership changes when a group is toggled or the custom set is
    /// edited. Without this a slider could control sensors with mixed values.
    pub fn sync_slider_thresholds(&self, selection: ActivePadSelection) -> EditOutcome {
        self.edit_active_pads(selection, |config, groups| {
            let technology = config.technology;
            let has_all_panels = config.has_all_panels();
            let resolver = ThresholdGroupResolver::new(groups, technology);
            let mut changed = false;
            for kind in SYNCED_SLIDERS {
                if !resolver.is_active(kind) {
                    continue;
                }
                let sensors = resolver.resolve(kind, has_all_panels, false);
                let Some(first) = sensors.first() else {
                    continue;
                };
                let (low, high) =
                    config.panels[usize::from(first.panel)].raw_threshold(technology, first.sensor);
                for sensor in sensors.iter() {
                    let panel = &mut config.panels[usize::from(sensor.panel)];
                    if panel.raw_threshold(technology, sensor.sensor) != (low, high) {
                        panel.set_raw_threshold(technology, sensor.sensor, low, high);
                        changed = true;
                    }
                }
            }
            changed
        })
    }

    /// Run `edit` on a copy of each targeted pad's configuration and commit it
    ///
    /// `edit` returns whether it changed anything worth writing.
    fn edit_active_pads<F>(&self, selection: ActivePadSelection, mut edit: F) -> EditOutcome
    where
        F: FnMut(&mut PadConfig, &SensorGroupSettings) -> bool,
    {
        if self.external_update.is_set() {
            return EditOutcome::Suppressed;
        }

        let groups = SensorGroupSettings::load(&*self.settings.borrow());
        let targets = selection.targets(self.store.borrow().connected());
        let mut report = EditReport::default();

        for pad in targets.iter() {
            let config = self.store.borrow().get(pad);
            let Ok(mut config) = config else {
                report.skipped.insert(pad);
                continue;
            };
            if !edit(&mut config, &groups) {
                continue;
            }
            match self.commit(pad, &config) {
                Ok(()) => report.applied.insert(pad),
                Err(_) => report.skipped.insert(pad),
            }
        }

        let changed = self.store.borrow_mut().take_pending();
        self.changes.post(ConfigChanged::edited(changed));

        if report.applied.is_empty() && report.skipped.is_empty() {
            EditOutcome::Inactive
        } else {
            EditOutcome::Applied(report)
        }
    }

    /// Store a pad's new configuration and write it to the device
    fn commit(&self, pad: PadIndex, config: &PadConfig) -> Result<()> {
        self.store.borrow_mut().set(pad, *config);
        let written = self.device.borrow_mut().write_config(pad, config);
        if let Err(error) = written {
            #[cfg(feature = "esp32-log")]
            println!("[ConfigSync.commit] skipping {:?}: {}", pad, error);
            if error == Error::NotConnected {
                self.store.borrow_mut().remove(pad);
            }
            return Err(error);
        }
        Ok(())
    }

    // ---- Device side ----

    /// Report configuration changes made on the device side
    ///
    /// The pads are re-read on the next [`Self::dispatch`].
    pub fn notify_device_changed(&self, pads: PadSet) {
        self.changes.post(ConfigChanged::reloaded(pads));
    }

    /// Re-read pads from the device now
    ///
    /// Pads the device no longer reports are dropped from the store.
    pub fn refresh_from_device(&self, pads: PadSet) {
        self.reload(pads);
        let changed = self.store.borrow_mut().take_pending();
        self.changes.post(ConfigChanged::edited(changed));
    }

    fn reload(&self, pads: PadSet) {
        let connected = self.device.borrow().connected_pads();
        for pad in pads.iter() {
            let config = if connected.contains(pad) {
                self.device.borrow_mut().read_config(pad).ok()
            } else {
                None
            };
            match config {
                Some(config) => {
                    self.store.borrow_mut().set(pad, config);
                    self.lights
                        .borrow_mut()
                        .set_known_color(pad, config.platform_strip_color());
                }
                None => {
                    #[cfg(feature = "esp32-log")]
                    println!("[ConfigSync.reload] {:?} is gone", pad);
                    self.store.borrow_mut().remove(pad);
                }
            }
        }
    }

    /// Refresh observers from queued changes
    ///
    /// Device-originated changes are re-read first. Observers run with the
    /// external-update flag held, so their edits are suppressed. Returns
    /// `false` if nothing was queued or a dispatch is already running.
    pub fn dispatch(&self, observers: &mut [&mut dyn ConfigObserver<D, S, EVENTS>]) -> bool {
        let Some(_guard) = self.external_update.acquire() else {
            #[cfg(feature = "esp32-log")]
            println!("[ConfigSync.dispatch] refusing nested dispatch");
            return false;
        };
        let Some(event) = self.changes.drain() else {
            return false;
        };

        self.reload(event.reloaded);
        // Everything pending is covered by `event`
        self.store.borrow_mut().take_pending();

        for observer in observers.iter_mut() {
            observer.load_from_config(self, event);
        }
        true
    }

    /// Send a due floor light command to the device
    ///
    /// Returns `true` if a command was written.
    pub fn poll_lights(&self, now: Instant) -> bool {
        let command = self.lights.borrow_mut().poll(now);
        let Some(command) = command else {
            return false;
        };
        let written = self.device.borrow_mut().write_raw_light_command(command.as_bytes());
        #[cfg(feature = "esp32-log")]
        if let Err(error) = written {
            println!("[ConfigSync.poll_lights] dropped light command: {}", error);
        }
        written.is_ok()
    }

    /// When [`Self::poll_lights`] next has work to do
    pub fn next_light_deadline(&self) -> Option<Instant> {
        self.lights.borrow().next_deadline()
    }

    // ---- Projections ----

    pub fn connected(&self) -> PadSet {
        self.store.borrow().connected()
    }

    pub fn config(&self, pad: PadIndex) -> Result<PadConfig> {
        self.store.borrow().get(pad)
    }

    /// Stored configuration, or a default for rendering an absent pad
    pub fn snapshot(&self, pad: PadIndex) -> PadConfig {
        self.store.borrow().snapshot(pad)
    }

    fn first_active(&self, selection: ActivePadSelection) -> Result<PadConfig> {
        self.store.borrow().first_active(selection)
    }

    fn groups(&self) -> SensorGroupSettings {
        SensorGroupSettings::load(&*self.settings.borrow())
    }

    /// Slider display state, read from the first active pad
    pub fn slider_state(
        &self,
        kind: SliderKind,
        selection: ActivePadSelection,
    ) -> Result<SliderState> {
        let config = self.first_active(selection)?;
        Ok(SliderState::new(kind, &config, &self.groups()))
    }

    /// Level meter reading for a slider from the meter pad's live data
    pub fn level_reading(
        &self,
        kind: SliderKind,
        selection: ActivePadSelection,
        data: &SensorTestData,
    ) -> Option<LevelReading> {
        let state = self.slider_state(kind, selection).ok()?;
        let technology = self.config(selection.meter_pad()).ok()?.technology;
        LevelReading::read(&state, data, technology)
    }

    /// Color as shown in the UI
    ///
    /// Fails with [`Error::InvalidPanel`] for a panel the pad does not have.
    pub fn color(&self, target: ColorTarget) -> Result<Rgb> {
        let config = self.config(target.pad())?;
        match target {
            ColorTarget::Panel { panel, .. } if !panel_exists(panel) => Err(Error::InvalidPanel),
            ColorTarget::Panel { panel, .. } => Ok(config.step_color(panel)),
            ColorTarget::Floor { .. } => Ok(config.platform_strip_color()),
        }
    }

    /// Whether [`Self::set_color`] would accept an edit of `target`
    pub fn color_available(&self, target: ColorTarget) -> bool {
        let Ok(config) = self.config(target.pad()) else {
            return false;
        };
        match target {
            ColorTarget::Panel { panel, .. } => {
                panel_exists(panel) && config.enabled_sensors.panel_enabled(panel)
            }
            ColorTarget::Floor { .. } => config.is_new_gen(),
        }
    }

    /// Color picker position for `target`
    pub fn hue_selection(&self, target: ColorTarget) -> Result<HueSelection> {
        self.color(target).map(hue_selection)
    }

    pub fn enabled_panels(&self, selection: ActivePadSelection) -> Result<[bool; PANEL_COUNT]> {
        Ok(self.first_active(selection)?.enabled_sensors.enabled_panels())
    }

    pub fn light_all_panels(&self, selection: ActivePadSelection) -> Result<bool> {
        Ok(self.first_active(selection)?.light_all_panels())
    }

    pub fn center_top_sensor_enabled(&self, selection: ActivePadSelection) -> Result<bool> {
        Ok(self.first_active(selection)?.center_top_sensor_enabled())
    }

    pub fn group_enabled(&self, group: SensorGroup) -> bool {
        self.settings.borrow().get_bool(group.setting_key())
    }

    pub fn custom_sensors(&self) -> SensorSet {
        self.settings.borrow().custom_sensors()
    }
}
