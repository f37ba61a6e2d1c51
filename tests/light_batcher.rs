mod tests {
    use embassy_time::{Duration, Instant};
    use smx_pad_config::color::Rgb;
    use smx_pad_config::light_batcher::{
        LIGHT_COMMAND_LEN, LIGHT_STRIP_SEGMENTS, LightCommand, LightCommandBatcher,
    };
    use smx_pad_config::pad::PadIndex;

    #[test]
    fn test_command_layout_is_pad_major() {
        let command = LightCommand::new([Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)]);
        let bytes = command.as_bytes();
        assert_eq!(bytes.len(), LIGHT_COMMAND_LEN);
        assert_eq!(LIGHT_COMMAND_LEN, 264);
        assert_eq!(&bytes[..3], &[1, 2, 3]);
        assert_eq!(&bytes[LIGHT_STRIP_SEGMENTS * 3 - 3..LIGHT_STRIP_SEGMENTS * 3], &[1, 2, 3]);
        assert_eq!(&bytes[LIGHT_STRIP_SEGMENTS * 3..LIGHT_STRIP_SEGMENTS * 3 + 3], &[4, 5, 6]);
        assert_eq!(command.segment_color(PadIndex::P2, 43), Rgb::new(4, 5, 6));
    }

    #[test]
    fn test_single_window_sends_one_command() {
        let mut batcher = LightCommandBatcher::new();
        for ms in 0..20u8 {
            let now = Instant::from_millis(u64::from(ms));
            batcher.request_color_write(PadIndex::P1, Rgb::new(ms, 0, 0), now);
        }
        assert_eq!(batcher.next_deadline(), Some(Instant::from_millis(33)));
        assert!(batcher.poll(Instant::from_millis(32)).is_none());

        let command = batcher.poll(Instant::from_millis(40)).unwrap();
        assert_eq!(command.segment_color(PadIndex::P1, 0), Rgb::new(19, 0, 0));
        assert!(!batcher.is_pending());
        assert!(batcher.poll(Instant::from_millis(80)).is_none());
    }

    #[test]
    fn test_drag_settles_on_final_color() {
        let other = Rgb::new(0, 0, 200);
        let mut batcher = LightCommandBatcher::new();
        batcher.set_known_color(PadIndex::P2, other);

        let mut sent = Vec::new();
        let mut last_event = 0;
        let mut final_color = Rgb::default();
        for ms in 0..=140u64 {
            let now = Instant::from_millis(ms);
            if ms <= 100 && ms % 5 == 0 {
                final_color = Rgb::new(ms as u8, 255 - ms as u8, 0);
                batcher.request_color_write(PadIndex::P1, final_color, now);
                last_event = ms;
            }
            if let Some(command) = batcher.poll(now) {
                sent.push((ms, command));
            }
        }

        let (sent_at, last) = sent.last().unwrap();
        assert!(*sent_at >= last_event && *sent_at - last_event <= 33);
        assert_eq!(last.segment_color(PadIndex::P1, 0), final_color);
        for (_, command) in &sent {
            assert_eq!(command.segment_color(PadIndex::P2, 0), other);
        }
        // One command per 33 ms window
        assert!(sent.len() <= 140 / 33 + 1);
        assert!(sent.windows(2).all(|pair| pair[1].0 - pair[0].0 >= 33));
    }

    #[test]
    fn test_custom_delay() {
        let mut batcher = LightCommandBatcher::with_delay(Duration::from_millis(10));
        batcher.request_color_write(PadIndex::P2, Rgb::new(9, 9, 9), Instant::from_millis(5));
        assert!(batcher.poll(Instant::from_millis(14)).is_none());
        assert!(batcher.poll(Instant::from_millis(15)).is_some());
    }
}
