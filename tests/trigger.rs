mod tests {
    use embassy_time::{Duration, Instant};
    use lednode_fx::trigger::{beat_phase, set_beat_phase, strobe_for, strobe_level};

    #[test]
    fn test_beat_phase_wraps_into_unit_interval() {
        set_beat_phase(0.25);
        assert!((beat_phase() - 0.25).abs() < 1e-6);

        set_beat_phase(3.75);
        assert!((beat_phase() - 0.75).abs() < 1e-6);

        set_beat_phase(-0.25);
        assert!((beat_phase() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_strobe_window() {
        let now = Instant::from_millis(1000);
        strobe_for(now, Duration::from_millis(100));

        assert_eq!(strobe_level(Instant::from_millis(1050)), 1.0);
        assert_eq!(strobe_level(Instant::from_millis(1100)), 0.0);
        assert_eq!(strobe_level(Instant::from_millis(5000)), 0.0);
    }
}
