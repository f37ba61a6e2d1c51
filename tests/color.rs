mod tests {
    use smx_pad_config::color::{
        HueSelection, Rgb, hue_selection, scale_color, selection_color, unscale_color,
    };

    #[test]
    fn test_scale_round_trip_stays_close() {
        for value in 0..=255u8 {
            let color = Rgb::new(value, value, value);
            let restored = unscale_color(scale_color(color));
            assert!(
                restored.r.abs_diff(value) <= 2,
                "{value} came back as {}",
                restored.r
            );
        }
    }

    #[test]
    fn test_scaled_values_fit_device_range() {
        let stored = scale_color(Rgb::new(255, 128, 0));
        assert_eq!(stored, [170, 85, 0]);
    }

    #[test]
    fn test_white_selection() {
        assert_eq!(selection_color(HueSelection::White), Rgb::new(255, 255, 255));
        assert_eq!(hue_selection(Rgb::new(255, 255, 255)), HueSelection::White);
        // Default stored step color reads back as white
        assert_eq!(hue_selection(unscale_color([170, 170, 170])), HueSelection::White);
    }

    #[test]
    fn test_dim_grey_is_not_white() {
        assert_eq!(hue_selection(Rgb::new(100, 100, 100)), HueSelection::Hue(0));
    }

    #[test]
    fn test_primary_hues() {
        assert_eq!(hue_selection(Rgb::new(255, 0, 0)), HueSelection::Hue(0));
        assert_eq!(hue_selection(Rgb::new(0, 255, 0)), HueSelection::Hue(85));
        assert_eq!(hue_selection(Rgb::new(0, 0, 255)), HueSelection::Hue(171));
    }
}
