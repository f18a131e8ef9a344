mod tests {
    use embassy_time::{Duration, Instant};
    use lednode_fx::PulseTransport;
    use lednode_fx::blend::BlendMode;
    use lednode_fx::color::Rgbw;
    use lednode_fx::compositor::Compositor;
    use lednode_fx::effect::{EffectParams, FX_SOLID};
    use lednode_fx::encoder::{ColorOrder, PulseSymbol, StripType};
    use lednode_fx::state::{ChannelConfig, CommandError, CompositorState};

    #[derive(Default)]
    struct CountingTransport {
        frames: usize,
        symbols: usize,
    }

    impl PulseTransport for CountingTransport {
        type Error = ();

        fn transmit(&mut self, symbols: &[PulseSymbol]) -> Result<(), ()> {
            self.symbols += symbols.len();
            Ok(())
        }

        fn hold(&mut self, _duration: Duration) {
            self.frames += 1;
        }
    }

    fn solid(color: Rgbw) -> EffectParams {
        EffectParams {
            effect_id: FX_SOLID,
            color1: color,
            ..EffectParams::DEFAULT
        }
    }

    fn small_config(pixel_count: u16) -> ChannelConfig {
        ChannelConfig {
            pixel_count,
            ..ChannelConfig::DEFAULT
        }
    }

    #[test]
    fn test_first_set_applies_immediately_despite_fade() {
        let state: CompositorState<1> = CompositorState::new();
        let mut compositor: Compositor<8, 1> = Compositor::new(&state, [small_config(8)]);
        let mut transport = CountingTransport::default();

        state
            .set_base(
                0,
                solid(Rgbw::new(255, 0, 0, 0)),
                Duration::from_millis(1000),
                Instant::from_millis(0),
            )
            .unwrap();
        compositor.tick(Instant::from_millis(0), &mut transport);

        for px in compositor.frame(0).unwrap() {
            assert_eq!(*px, Rgbw::new(255, 0, 0, 0));
        }
        assert_eq!(transport.frames, 1);
    }

    #[test]
    fn test_crossfade_mixes_and_promotes() {
        let state: CompositorState<1> = CompositorState::new();
        let mut compositor: Compositor<8, 1> = Compositor::new(&state, [small_config(8)]);
        let mut transport = CountingTransport::default();

        state
            .set_base(
                0,
                solid(Rgbw::new(255, 0, 0, 0)),
                Duration::from_millis(0),
                Instant::from_millis(0),
            )
            .unwrap();
        state
            .set_base(
                0,
                solid(Rgbw::new(0, 0, 255, 0)),
                Duration::from_millis(1000),
                Instant::from_millis(0),
            )
            .unwrap();

        // Halfway through the window the eased mix is exactly 0.5.
        compositor.tick(Instant::from_millis(500), &mut transport);
        for px in compositor.frame(0).unwrap() {
            assert_eq!(px.r, 127);
            assert_eq!(px.g, 0);
            assert_eq!(px.b, 127);
        }

        // Past the window the fade promotes and renders the target alone.
        compositor.tick(Instant::from_millis(1100), &mut transport);
        for px in compositor.frame(0).unwrap() {
            assert_eq!(*px, Rgbw::new(0, 0, 255, 0));
        }

        // Later frames stay on the promoted effect.
        compositor.tick(Instant::from_millis(2000), &mut transport);
        for px in compositor.frame(0).unwrap() {
            assert_eq!(*px, Rgbw::new(0, 0, 255, 0));
        }
    }

    #[test]
    fn test_zero_fade_switches_without_window() {
        let state: CompositorState<1> = CompositorState::new();
        let mut compositor: Compositor<8, 1> = Compositor::new(&state, [small_config(8)]);
        let mut transport = CountingTransport::default();

        state
            .set_base(
                0,
                solid(Rgbw::new(255, 0, 0, 0)),
                Duration::from_millis(0),
                Instant::from_millis(0),
            )
            .unwrap();
        state
            .set_base(
                0,
                solid(Rgbw::new(0, 255, 0, 0)),
                Duration::from_millis(0),
                Instant::from_millis(10),
            )
            .unwrap();

        compositor.tick(Instant::from_millis(10), &mut transport);
        for px in compositor.frame(0).unwrap() {
            assert_eq!(*px, Rgbw::new(0, 255, 0, 0));
        }
    }

    #[test]
    fn test_overlay_blends_over_base() {
        let state: CompositorState<1> = CompositorState::new();
        let mut compositor: Compositor<8, 1> = Compositor::new(&state, [small_config(8)]);
        let mut transport = CountingTransport::default();

        state
            .set_base(
                0,
                solid(Rgbw::new(100, 0, 0, 0)),
                Duration::from_millis(0),
                Instant::from_millis(0),
            )
            .unwrap();
        state
            .set_overlay(
                0,
                Some(EffectParams {
                    blend: BlendMode::Add,
                    ..solid(Rgbw::new(0, 80, 0, 0))
                }),
            )
            .unwrap();

        compositor.tick(Instant::from_millis(0), &mut transport);
        for px in compositor.frame(0).unwrap() {
            assert_eq!(*px, Rgbw::new(100, 80, 0, 0));
        }

        state.clear_overlay(0).unwrap();
        compositor.tick(Instant::from_millis(100), &mut transport);
        for px in compositor.frame(0).unwrap() {
            assert_eq!(*px, Rgbw::new(100, 0, 0, 0));
        }
    }

    #[test]
    fn test_overlay_opacity_scales_contribution() {
        let state: CompositorState<1> = CompositorState::new();
        let mut compositor: Compositor<8, 1> = Compositor::new(&state, [small_config(8)]);
        let mut transport = CountingTransport::default();

        state
            .set_base(
                0,
                solid(Rgbw::new(0, 0, 0, 0)),
                Duration::from_millis(0),
                Instant::from_millis(0),
            )
            .unwrap();
        state
            .set_overlay(
                0,
                Some(EffectParams {
                    blend: BlendMode::Add,
                    opacity: 128,
                    ..solid(Rgbw::new(255, 0, 0, 0))
                }),
            )
            .unwrap();

        compositor.tick(Instant::from_millis(0), &mut transport);
        for px in compositor.frame(0).unwrap() {
            assert_eq!(px.r, 128);
        }
    }

    #[test]
    fn test_oversized_channel_is_disabled() {
        let state: CompositorState<2> = CompositorState::new();
        let configs = [small_config(8), small_config(1000)];
        let mut compositor: Compositor<8, 2> = Compositor::new(&state, configs);
        let mut transport = CountingTransport::default();

        state
            .set_base(
                0,
                solid(Rgbw::new(255, 255, 255, 0)),
                Duration::from_millis(0),
                Instant::from_millis(0),
            )
            .unwrap();
        state
            .set_base(
                1,
                solid(Rgbw::new(255, 255, 255, 0)),
                Duration::from_millis(0),
                Instant::from_millis(0),
            )
            .unwrap();

        compositor.tick(Instant::from_millis(0), &mut transport);

        // Only the fitting channel transmits.
        assert_eq!(transport.frames, 1);
        for px in compositor.frame(1).unwrap() {
            assert_eq!(*px, Rgbw::default());
        }
    }

    #[test]
    fn test_tick_reports_next_deadline() {
        let state: CompositorState<1> = CompositorState::new();
        let config = ChannelConfig {
            frame_interval: Duration::from_millis(20),
            ..small_config(4)
        };
        let mut compositor: Compositor<8, 1> = Compositor::new(&state, [config]);
        let mut transport = CountingTransport::default();

        let result = compositor.tick(Instant::from_millis(100), &mut transport);
        assert_eq!(result.next_deadline, Instant::from_millis(120));
        assert_eq!(result.sleep_duration, Duration::from_millis(20));

        // Before the deadline nothing renders and the report is unchanged.
        let frames_before = transport.frames;
        let result = compositor.tick(Instant::from_millis(110), &mut transport);
        assert_eq!(transport.frames, frames_before);
        assert_eq!(result.next_deadline, Instant::from_millis(120));
        assert_eq!(result.sleep_duration, Duration::from_millis(10));
    }

    #[test]
    fn test_empty_channel_renders_dark() {
        let state: CompositorState<1> = CompositorState::new();
        let mut compositor: Compositor<8, 1> = Compositor::new(&state, [small_config(8)]);
        let mut transport = CountingTransport::default();

        compositor.tick(Instant::from_millis(0), &mut transport);
        for px in compositor.frame(0).unwrap() {
            assert_eq!(*px, Rgbw::default());
        }
    }

    #[test]
    fn test_invalid_channel_is_rejected() {
        let state: CompositorState<2> = CompositorState::new();
        assert_eq!(
            state.set_base(
                5,
                solid(Rgbw::default()),
                Duration::from_millis(0),
                Instant::from_millis(0)
            ),
            Err(CommandError::InvalidChannel)
        );
        assert_eq!(state.set_overlay(9, None), Err(CommandError::InvalidChannel));
        assert!(state.channel_info(2).is_none());
    }

    #[test]
    fn test_power_scales_default_to_unity() {
        let state: CompositorState<3> = CompositorState::new();
        let mut scales = [0.0f32; 3];
        state.power_scales(&mut scales);
        assert_eq!(scales, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_channel_retype_reflected_in_info() {
        let state: CompositorState<1> = CompositorState::new();
        state
            .set_channel_type(0, StripType::Sk6812Rgbw, ColorOrder::Grbw)
            .unwrap();

        let info = state.channel_info(0).unwrap();
        assert_eq!(info.strip, StripType::Sk6812Rgbw);
        assert_eq!(info.order, ColorOrder::Grbw);
        assert_eq!(state.channel_count(), 1);
    }
}
