mod tests {
    use smx_pad_config::config::{PANEL_COUNT, SensorMask};

    #[test]
    fn test_pack_unpack_is_lossless() {
        for value in 0..=255u8 {
            for position in 0..5 {
                let mut bytes = [0x5A; 5];
                bytes[position] = value;
                let mask = SensorMask::from_bytes(bytes);
                assert_eq!(SensorMask::pack(mask.unpack()), mask);
            }
        }
    }

    #[test]
    fn test_all_panels_enabled() {
        assert_eq!(SensorMask::ALL_PANELS.enabled_panels(), [true; PANEL_COUNT]);
        assert_eq!(SensorMask::ALL_PANELS.panel_bits(), 0x01FF);
    }

    #[test]
    fn test_disabling_corners() {
        let mut enabled = [true; PANEL_COUNT];
        for corner in [0, 2, 6, 8] {
            enabled[corner] = false;
        }
        let mask = SensorMask::ALL_PANELS.with_enabled_panels(enabled);
        assert_eq!(mask.bytes(), [0x0F, 0x0F, 0xFF, 0x0F, 0x00]);
        assert_eq!(mask.panel_bits(), 0b0_1011_1010);
    }

    #[test]
    fn test_reenabled_panel_gets_all_sensors() {
        let mut mask = SensorMask::from_bytes([0; 5]);
        mask.set_panel_sensors(4, 0b0101);
        let mut enabled = [false; PANEL_COUNT];
        enabled[1] = true;
        enabled[4] = true;
        let mask = mask.with_enabled_panels(enabled);
        assert_eq!(mask.panel_sensors(1), 0x0F);
        // Already enabled panels keep their sensors
        assert_eq!(mask.panel_sensors(4), 0b0101);
    }

    #[test]
    fn test_reserved_nibble_survives_edits() {
        let mask = SensorMask::from_bytes([0xFF, 0xFF, 0xFF, 0xFF, 0xF3]);
        let edited = mask.with_enabled_panels([false; PANEL_COUNT]);
        assert_eq!(edited.bytes(), [0, 0, 0, 0, 0x03]);
    }
}
