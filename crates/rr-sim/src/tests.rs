use rr_core::{ScriptedDraws, SegmentId, SimConfig, Tick};
use rr_road::{BehaviorProfile, ManualVehicle, SegmentSpec};

use crate::{NoopObserver, RunSummary, SimBuilder, SimError, SimObserver, TickRecord};

fn car_at(position: i64, speed: u32) -> ManualVehicle {
    ManualVehicle {
        segment: SegmentId(0),
        position,
        speed,
        profile: BehaviorProfile::car(),
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

mod builder_tests {
    use super::*;

    #[test]
    fn builds_the_reference_scenario() {
        let sim = SimBuilder::new(SimConfig::with_seed(42))
            .segment(SegmentSpec::cars(30))
            .build()
            .unwrap();
        assert_eq!(sim.circuit.vehicle_count(), 30);
        assert_eq!(sim.circuit.total_length(), 1000);
        assert_eq!(sim.clock.current_tick, Tick::ZERO);
    }

    #[test]
    fn rejects_zero_tick_duration() {
        let mut config = SimConfig::with_seed(1);
        config.tick_duration_secs = 0;
        let err = SimBuilder::new(config)
            .segment(SegmentSpec::cars(5))
            .build()
            .unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn rejects_empty_loop() {
        let err = SimBuilder::new(SimConfig::with_seed(1)).build().unwrap_err();
        assert!(matches!(
            err,
            SimError::Circuit(rr_road::CircuitError::NoSegments)
        ));
    }

    #[test]
    fn circuit_errors_surface_through_the_builder() {
        // Position 2000 is outside the single 1000-unit segment.
        let err = SimBuilder::new(SimConfig::with_seed(1))
            .segment(SegmentSpec::cars(0))
            .vehicles(vec![car_at(2000, 0)])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SimError::Circuit(rr_road::CircuitError::InvalidPlacement(_))
        ));
    }

    #[test]
    fn explicit_layout_overrides_even_spacing() {
        let sim = SimBuilder::new(SimConfig::with_seed(1))
            .segment(SegmentSpec::cars(30))
            .vehicles(vec![car_at(4, 28), car_at(500, 28)])
            .build()
            .unwrap();
        assert_eq!(sim.circuit.vehicle_count(), 2);
    }
}

// ── The run loop ─────────────────────────────────────────────────────────────

mod run_tests {
    use super::*;

    #[test]
    fn run_for_advances_clock_and_history_together() {
        let mut sim = SimBuilder::new(SimConfig::with_seed(7))
            .segment(SegmentSpec::cars(10))
            .build()
            .unwrap();

        let summary = sim.run_for(3);
        assert_eq!(summary.ticks_run, 3);
        assert_eq!(sim.history().len(), 3);
        assert_eq!(sim.clock.current_tick, Tick(3));

        // A second run summarizes only its own ticks.
        let summary = sim.run_for(2);
        assert_eq!(summary.ticks_run, 2);
        assert_eq!(sim.history().len(), 5);
        assert_eq!(sim.clock.current_tick, Tick(5));
    }

    #[test]
    fn records_are_stamped_with_the_tick_they_describe() {
        let mut sim = SimBuilder::new(SimConfig::with_seed(7))
            .segment(SegmentSpec::cars(10))
            .build()
            .unwrap();
        sim.run_for(4);
        let ticks: Vec<Tick> = sim.history().iter().map(|r| r.tick).collect();
        assert_eq!(ticks, vec![Tick(0), Tick(1), Tick(2), Tick(3)]);
    }

    #[test]
    fn lone_car_reaches_desired_speed_without_jamming() {
        let mut sim = SimBuilder::new(SimConfig::with_seed(1))
            .segment(SegmentSpec::cars(0))
            .vehicles(vec![car_at(4, 28)])
            .build_with_draws(ScriptedDraws::never_slow())
            .unwrap();

        // 28 → 30 → 32 → 33, then capped.
        let summary = sim.run_for(5);
        assert_eq!(summary.mean_final_speed, 33.0);
        assert!(!summary.jam_detected);

        let speeds: Vec<u32> = sim.history().iter().map(|r| r.speeds[0]).collect();
        assert_eq!(speeds, vec![30, 32, 33, 33, 33]);
    }

    #[test]
    fn mean_final_speed_averages_the_last_tick() {
        let mut sim = SimBuilder::new(SimConfig::with_seed(1))
            .segment(SegmentSpec::cars(0))
            .vehicles(vec![car_at(4, 28), car_at(500, 26)])
            .build_with_draws(ScriptedDraws::never_slow())
            .unwrap();
        let summary = sim.run_for(1);
        // Both accelerate by 2: (30 + 28) / 2.
        assert_eq!(summary.mean_final_speed, 29.0);
    }

    #[test]
    fn forced_collision_reports_a_jam() {
        // Follower at 490 plans 518, well past the leader's rear bumper at
        // 496, so it must stop on the first tick.
        let mut sim = SimBuilder::new(SimConfig::with_seed(1))
            .segment(SegmentSpec::cars(0))
            .vehicles(vec![car_at(490, 28), car_at(500, 0)])
            .build_with_draws(ScriptedDraws::never_slow())
            .unwrap();

        let summary = sim.run_for(1);
        assert!(summary.jam_detected);
        assert_eq!(sim.history()[0].stopped, 1);
        assert_eq!(sim.history()[0].speeds[0], 0);
    }

    #[test]
    fn jam_flag_is_scoped_to_the_run() {
        let mut sim = SimBuilder::new(SimConfig::with_seed(1))
            .segment(SegmentSpec::cars(0))
            .vehicles(vec![car_at(490, 28), car_at(500, 0)])
            .build_with_draws(ScriptedDraws::never_slow())
            .unwrap();

        assert!(sim.run_for(1).jam_detected);

        // An empty follow-up run has nothing stopped in it.
        let summary = sim.run_for(0);
        assert_eq!(summary.ticks_run, 0);
        assert!(!summary.jam_detected);
        assert_eq!(summary.mean_final_speed, 0.0);
    }

    #[test]
    fn equal_seeds_reproduce_the_run() {
        let run = |seed: u64| {
            let mut sim = SimBuilder::new(SimConfig::with_seed(seed))
                .segment(SegmentSpec::cars(30))
                .build()
                .unwrap();
            sim.run_for(50);
            sim.history().to_vec()
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn different_seeds_diverge() {
        let run = |seed: u64| {
            let mut sim = SimBuilder::new(SimConfig::with_seed(seed))
                .segment(SegmentSpec::cars(30))
                .build()
                .unwrap();
            sim.run_for(50);
            sim.history().to_vec()
        };
        assert_ne!(run(1), run(2));
    }

    #[test]
    fn occupancy_footprint_is_conserved() {
        let mut sim = SimBuilder::new(SimConfig::with_seed(9))
            .segment(SegmentSpec::cars(30))
            .build()
            .unwrap();
        sim.run_for(100);
        for record in sim.history() {
            assert_eq!(record.occupied_cells(), 30 * 5, "at {}", record.tick);
        }
    }
}

// ── Observers ────────────────────────────────────────────────────────────────

mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct CountingObserver {
        starts: usize,
        ends: usize,
        snapshots: usize,
        run_ends: usize,
        last_summary: Option<RunSummary>,
    }

    impl SimObserver for CountingObserver {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.starts += 1;
        }
        fn on_tick_end(&mut self, _tick: Tick, _record: &TickRecord) {
            self.ends += 1;
        }
        fn on_snapshot(&mut self, _tick: Tick, _circuit: &rr_road::Circuit) {
            self.snapshots += 1;
        }
        fn on_run_end(&mut self, summary: &RunSummary) {
            self.run_ends += 1;
            self.last_summary = Some(*summary);
        }
    }

    #[test]
    fn hooks_fire_once_per_tick() {
        let mut sim = SimBuilder::new(SimConfig::with_seed(3))
            .segment(SegmentSpec::cars(10))
            .build()
            .unwrap();
        let mut observer = CountingObserver::default();
        let summary = sim.run_with(10, &mut observer);

        assert_eq!(observer.starts, 10);
        assert_eq!(observer.ends, 10);
        assert_eq!(observer.run_ends, 1);
        assert_eq!(observer.last_summary, Some(summary));
    }

    #[test]
    fn snapshots_follow_the_configured_interval() {
        let mut config = SimConfig::with_seed(3);
        config.output_interval_ticks = 2;
        let mut sim = SimBuilder::new(config)
            .segment(SegmentSpec::cars(10))
            .build()
            .unwrap();
        let mut observer = CountingObserver::default();
        sim.run_with(10, &mut observer);

        // Ticks 0, 2, 4, 6, 8.
        assert_eq!(observer.snapshots, 5);
    }

    #[test]
    fn snapshots_disabled_at_interval_zero() {
        let mut sim = SimBuilder::new(SimConfig::with_seed(3))
            .segment(SegmentSpec::cars(10))
            .build()
            .unwrap();
        let mut observer = CountingObserver::default();
        sim.run_with(10, &mut observer);
        assert_eq!(observer.snapshots, 0);
    }

    #[test]
    fn noop_observer_matches_plain_run() {
        let build = || {
            SimBuilder::new(SimConfig::with_seed(11))
                .segment(SegmentSpec::cars(20))
                .build()
                .unwrap()
        };
        let mut a = build();
        let mut b = build();
        let plain = a.run_for(25);
        let observed = b.run_with(25, &mut NoopObserver);
        assert_eq!(plain, observed);
        assert_eq!(a.history(), b.history());
    }
}
