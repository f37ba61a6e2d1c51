#![allow(dead_code)]

use smx_pad_config::{
    Error, PAD_COUNT, PadConfig, PadDevice, PadIndex, PadSet, Result, SensorSet, SettingKey,
    SettingsStore,
};

/// In-memory pad pair recording every write
#[derive(Debug, Default)]
pub struct MockDevice {
    pub configs: [Option<PadConfig>; PAD_COUNT],
    pub config_writes: Vec<(PadIndex, PadConfig)>,
    pub light_commands: Vec<Vec<u8>>,
    /// Pads that drop off on their next config write
    pub disconnect_on_write: PadSet,
}

impl MockDevice {
    pub fn with_pads(pads: PadSet, config: PadConfig) -> Self {
        let mut device = Self::default();
        for pad in pads.iter() {
            device.configs[pad.index()] = Some(config);
        }
        device
    }

    pub fn writes_to(&self, pad: PadIndex) -> usize {
        self.config_writes.iter().filter(|(written, _)| *written == pad).count()
    }
}

impl PadDevice for MockDevice {
    fn read_config(&mut self, pad: PadIndex) -> Result<PadConfig> {
        self.configs[pad.index()].ok_or(Error::NotConnected)
    }

    fn write_config(&mut self, pad: PadIndex, config: &PadConfig) -> Result<()> {
        if self.disconnect_on_write.contains(pad) {
            self.configs[pad.index()] = None;
        }
        let Some(stored) = self.configs[pad.index()].as_mut() else {
            return Err(Error::NotConnected);
        };
        *stored = *config;
        self.config_writes.push((pad, *config));
        Ok(())
    }

    fn write_raw_light_command(&mut self, command: &[u8]) -> Result<()> {
        self.light_commands.push(command.to_vec());
        Ok(())
    }

    fn connected_pads(&self) -> PadSet {
        PadIndex::ALL
            .into_iter()
            .filter(|pad| self.configs[pad.index()].is_some())
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct MemorySettings {
    pub custom: SensorSet,
    pub use_inner: bool,
    pub use_outer: bool,
}

impl SettingsStore for MemorySettings {
    fn custom_sensors(&self) -> SensorSet {
        self.custom.clone()
    }

    fn set_custom_sensors(&mut self, sensors: &SensorSet) {
        self.custom = sensors.clone();
    }

    fn get_bool(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::UseInnerSensorThresholds => self.use_inner,
            SettingKey::UseOuterSensorThresholds => self.use_outer,
        }
    }

    fn set_bool(&mut self, key: SettingKey, value: bool) {
        match key {
            SettingKey::UseInnerSensorThresholds => self.use_inner = value,
            SettingKey::UseOuterSensorThresholds => self.use_outer = value,
        }
    }
}
