mod tests {
    use smx_pad_config::events::{ChangeChannel, ConfigChanged};
    use smx_pad_config::pad::{PadIndex, PadSet};

    #[test]
    fn test_drain_merges_queued_events() {
        let channel: ChangeChannel<4> = ChangeChannel::new();
        let sender = channel.sender();
        sender.post(ConfigChanged::edited(PadSet::single(PadIndex::P1)));
        sender.device_changed(PadIndex::P2);
        sender.post(ConfigChanged::settings_changed());

        let merged = channel.receiver().drain().unwrap();
        assert_eq!(merged.edited, PadSet::single(PadIndex::P1));
        assert_eq!(merged.reloaded, PadSet::single(PadIndex::P2));
        assert!(merged.settings);
        assert_eq!(merged.pads(), PadSet::ALL);
        assert!(channel.is_empty());
        assert!(channel.drain().is_none());
    }

    #[test]
    fn test_full_channel_keeps_every_pad() {
        let channel: ChangeChannel<2> = ChangeChannel::new();
        channel.post(ConfigChanged::edited(PadSet::single(PadIndex::P1)));
        channel.post(ConfigChanged::edited(PadSet::single(PadIndex::P1)));
        channel.post(ConfigChanged::reloaded(PadSet::single(PadIndex::P2)));
        channel.post(ConfigChanged::settings_changed());

        let merged = channel.drain().unwrap();
        assert_eq!(merged.pads(), PadSet::ALL);
        assert!(merged.settings);
    }

    #[test]
    fn test_empty_events_are_dropped() {
        let channel: ChangeChannel<2> = ChangeChannel::new();
        channel.post(ConfigChanged::default());
        channel.post(ConfigChanged::edited(PadSet::EMPTY));
        assert!(channel.is_empty());
    }
}
