mod common;

mod tests {
    use super::common::RecordingSink;
    use myrtio_matrix_composer::{
        EffectId, HEIGHT, Rgb, WIDTH,
        effect::{
            Effect, EffectContext, EffectMemory, FireEffect, GradientEffect, MAX_SPARKLES,
            MatrixEffect, PlasmaEffect, RainbowEffect, SPARKLE_LIFETIME, SparkleEffect,
            heat_color, trail_level,
        },
        hsv_to_rgb,
        rng::Rng,
    };

    #[test]
    fn test_effect_id_parse() {
        assert_eq!(EffectId::parse_from_str("fire"), Some(EffectId::Fire));
        assert_eq!(EffectId::parse_from_str("none"), Some(EffectId::None));
        assert_eq!(EffectId::parse_from_str("aurora"), None);
    }

    #[test]
    fn test_effect_id_as_str_round_trips() {
        for id in EffectId::ALL {
            assert_eq!(EffectId::parse_from_str(id.as_str()), Some(id));
        }
    }

    #[test]
    fn test_fire_rise_updates_in_place() {
        let mut heat = [[0u8; HEIGHT]; WIDTH];
        heat[0][0] = 90;
        heat[0][1] = 60;
        let mut fire = FireEffect::with_heat(heat);

        fire.rise();
        let heat = fire.heat();

        // Column 0 reads only cells not yet touched in this pass
        assert_eq!(heat[0][..4], [90, 30, 20, 0]);
        // Column 1 reads the already updated column 0: (30 / 3) and (20 / 3),
        // where a copy of the previous grid would give 20 and 0
        assert_eq!(heat[1][..5], [0, 30, 10, 6, 0]);
        // The wrapped neighbour of column 0 sees it updated too
        assert_eq!(heat[WIDTH - 1][..4], [0, 30, 10, 6]);
    }

    #[test]
    fn test_fire_keeps_burning() {
        let mut rng = Rng::new(7);
        let mut fire = FireEffect::new();
        for frame in 0..500 {
            let mut ctx = EffectContext {
                frame,
                rng: &mut rng,
            };
            fire.step(&mut ctx);
        }
        assert!(fire.heat().iter().any(|column| column[0] > 0));
        assert!(fire.heat().iter().any(|column| column[1] > 0));
    }

    #[test]
    fn test_fire_from_cold_only_heats_bottom_row() {
        // Rise runs before ignition, so one step cannot lift fresh heat
        let mut rng = Rng::new(3);
        let mut fire = FireEffect::new();
        let mut ctx = EffectContext {
            frame: 0,
            rng: &mut rng,
        };
        fire.step(&mut ctx);
        for column in fire.heat() {
            assert!(column[1..].iter().all(|heat| *heat == 0));
            assert!(column[0] == 0 || column[0] >= 160);
        }
    }

    #[test]
    fn test_heat_palette() {
        assert_eq!(heat_color(0), Rgb::new(0, 0, 0));
        assert_eq!(heat_color(63), Rgb::new(252, 0, 0));
        assert_eq!(heat_color(64), Rgb::new(255, 0, 0));
        assert_eq!(heat_color(127), Rgb::new(255, 252, 0));
        assert_eq!(heat_color(128), Rgb::new(255, 255, 0));
        assert_eq!(heat_color(191), Rgb::new(255, 255, 252));
        assert_eq!(heat_color(192), Rgb::new(255, 255, 255));
        assert_eq!(heat_color(255), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_fire_paints_bottom_row_from_heat_row_zero() {
        let mut rng = Rng::new(11);
        let mut fire = FireEffect::new();
        let mut sink = RecordingSink::new();
        let mut ctx = EffectContext {
            frame: 0,
            rng: &mut rng,
        };
        fire.render(&mut ctx, &mut sink);
        assert_eq!(sink.set_pixel_calls, WIDTH * HEIGHT);
        for x in 0..WIDTH {
            assert_eq!(sink.pixel(x, HEIGHT - 1), heat_color(fire.heat()[x][0]));
        }
    }

    #[test]
    fn test_rainbow_hue_formula() {
        let mut rng = Rng::default();
        let mut sink = RecordingSink::new();
        let mut ctx = EffectContext {
            frame: 4,
            rng: &mut rng,
        };
        RainbowEffect.render(&mut ctx, &mut sink);
        // (20 * (3 + 2) + 5 * 4) % 360 = 120
        assert_eq!(sink.pixel(3, 2), hsv_to_rgb(120.0, 1.0, 1.0));
        assert_eq!(sink.pixel(0, 0), hsv_to_rgb(20.0, 1.0, 1.0));
    }

    #[test]
    fn test_gradient_fills_rows() {
        let mut rng = Rng::default();
        let mut sink = RecordingSink::new();
        let mut ctx = EffectContext {
            frame: 10,
            rng: &mut rng,
        };
        GradientEffect.render(&mut ctx, &mut sink);
        for y in 0..HEIGHT {
            let hue = ((2 * 10 + 20 * y) % 360) as f32;
            let expected = hsv_to_rgb(hue, 1.0, 0.8);
            for x in 0..WIDTH {
                assert_eq!(sink.pixel(x, y), expected);
            }
        }
    }

    #[test]
    fn test_plasma_hue_mapping() {
        let mut rng = Rng::new(1);
        let mut sink = RecordingSink::new();

        // t = 0 at (0, 0): only the radial term is non-zero, v = -0.1465
        let mut ctx = EffectContext {
            frame: 0,
            rng: &mut rng,
        };
        PlasmaEffect.render(&mut ctx, &mut sink);
        assert_eq!(sink.pixel(0, 0), hsv_to_rgb(153.0, 1.0, 1.0));

        // t = 1 at (4, 2): v = 0.6197
        let mut ctx = EffectContext {
            frame: 10,
            rng: &mut rng,
        };
        PlasmaEffect.render(&mut ctx, &mut sink);
        assert_eq!(sink.pixel(4, 2), hsv_to_rgb(291.0, 1.0, 1.0));
    }

    #[test]
    fn test_plasma_field_is_bounded() {
        for frame in [0u32, 17, 400] {
            let t = frame as f32 * 0.1;
            for y in 0..HEIGHT {
                for x in 0..WIDTH {
                    let v = PlasmaEffect::field(x as f32, y as f32, t);
                    assert!((-1.0..=1.0).contains(&v));
                }
            }
        }
    }

    #[test]
    fn test_matrix_trail_levels() {
        assert_eq!(trail_level(0), 255);
        assert_eq!(trail_level(1), 225);
        assert_eq!(trail_level(7), 45);
        assert_eq!(trail_level(9), 0);
    }

    #[test]
    fn test_matrix_drops_respawn_above_matrix() {
        let mut rng = Rng::new(5);
        let mut effect = MatrixEffect::new(&mut rng);
        let mut sink = RecordingSink::new();
        for frame in 0..2_000 {
            let mut ctx = EffectContext {
                frame,
                rng: &mut rng,
            };
            effect.render(&mut ctx, &mut sink);
            for drop in effect.drops() {
                assert!(drop.y <= HEIGHT as f32 + 8.0 + 0.4);
                assert!(drop.speed >= 0.1 && drop.speed < 0.41);
            }
        }
        assert!(sink.lit().iter().all(|(_, _, c)| c.r == 0 && c.b == 0));
    }

    #[test]
    fn test_sparkles_never_keep_dead_entries() {
        let mut rng = Rng::new(9);
        let mut effect = SparkleEffect::new();
        for frame in 0..300 {
            let mut ctx = EffectContext {
                frame,
                rng: &mut rng,
            };
            effect.step(&mut ctx);
            for sparkle in effect.sparkles() {
                assert!(sparkle.brightness > 0.0);
                assert!(sparkle.brightness <= 1.0);
                assert!((0..WIDTH as i32).contains(&sparkle.x));
                assert!((0..HEIGHT as i32).contains(&sparkle.y));
            }
        }
    }

    #[test]
    fn test_sparkle_count_stays_within_lifetime() {
        let mut rng = Rng::new(21);
        let mut effect = SparkleEffect::new();
        for frame in 0..5000 {
            let mut ctx = EffectContext {
                frame,
                rng: &mut rng,
            };
            effect.step(&mut ctx);
            let sparkles = effect.sparkles();
            assert!(sparkles.len() <= SPARKLE_LIFETIME);
            assert!(SPARKLE_LIFETIME < MAX_SPARKLES);

            // One spawn per frame at most, so no two share an age
            for (i, a) in sparkles.iter().enumerate() {
                for b in &sparkles[i + 1..] {
                    assert!((a.brightness - b.brightness).abs() > 0.05);
                }
            }
        }
    }

    #[test]
    fn test_none_effect_draws_nothing() {
        let mut rng = Rng::default();
        let mut memory = EffectMemory::new(&mut rng);
        let mut sink = RecordingSink::new();
        let mut ctx = EffectContext {
            frame: 0,
            rng: &mut rng,
        };
        memory.render(EffectId::None, &mut ctx, &mut sink);
        assert_eq!(sink.set_pixel_calls, 0);
        assert_eq!(sink.clears, 0);
    }

    #[test]
    fn test_clearing_effects_clear_first() {
        let mut rng = Rng::default();
        let mut memory = EffectMemory::new(&mut rng);
        let mut sink = RecordingSink::new();
        let mut ctx = EffectContext {
            frame: 0,
            rng: &mut rng,
        };
        memory.render(EffectId::Matrix, &mut ctx, &mut sink);
        memory.render(EffectId::Sparkle, &mut ctx, &mut sink);
        memory.render(EffectId::Rainbow, &mut ctx, &mut sink);
        assert_eq!(sink.clears, 2);
    }
}
