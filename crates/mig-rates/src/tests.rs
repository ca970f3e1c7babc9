//! Unit tests for mig-rates.

use mig_core::{MigrationType, NodeId};

use crate::{InterpolationType, RateTable};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn constant(dest: u32, rate: f64) -> RateTable {
    RateTable::constant(NodeId(dest), MigrationType::Local, rate).unwrap()
}

/// Linear table: `rates[i]` at `ages[i]`.
fn curve(dest: u32, kind: MigrationType, ages: &[f64], rates: &[f64]) -> RateTable {
    let mut t = RateTable::new(NodeId(dest), kind, InterpolationType::Linear);
    for (&a, &r) in ages.iter().zip(rates) {
        t.add_rate(a, r).unwrap();
    }
    t
}

// ── RateTable ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rate_table {
    use approx::assert_relative_eq;

    use super::*;
    use crate::RatesError;

    #[test]
    fn empty_table_rate_is_zero() {
        let t = RateTable::new(NodeId(1), MigrationType::Air, InterpolationType::Linear);
        assert_eq!(t.num_rates(), 0);
        assert_eq!(t.get_rate(10.0), 0.0);
    }

    #[test]
    fn linear_interpolates_inside_and_clamps_outside() {
        let t = curve(1, MigrationType::Local, &[10.0, 20.0, 40.0], &[0.1, 0.3, 0.1]);
        assert_relative_eq!(t.get_rate(15.0), 0.2, epsilon = 1e-12);
        assert_relative_eq!(t.get_rate(30.0), 0.2, epsilon = 1e-12);
        assert_relative_eq!(t.get_rate(20.0), 0.3);
        assert_relative_eq!(t.get_rate(0.0), 0.1);
        assert_relative_eq!(t.get_rate(90.0), 0.1);
    }

    #[test]
    fn linear_is_bounded_by_configured_rates() {
        let t = curve(1, MigrationType::Local, &[0.0, 5.0, 15.0, 60.0], &[0.02, 0.5, 0.05, 0.3]);
        let (lo, hi) = (0.02, 0.5);
        let mut age = -5.0;
        while age < 80.0 {
            let r = t.get_rate(age);
            assert!(r >= lo - 1e-12 && r <= hi + 1e-12, "rate {r} at age {age}");
            age += 0.25;
        }
    }

    #[test]
    fn linear_is_continuous_at_breakpoints() {
        let t = curve(1, MigrationType::Local, &[10.0, 20.0], &[0.1, 0.3]);
        let eps = 1e-9;
        assert!((t.get_rate(20.0 - eps) - t.get_rate(20.0)).abs() < 1e-6);
        assert!((t.get_rate(10.0 + eps) - t.get_rate(10.0)).abs() < 1e-6);
    }

    #[test]
    fn piecewise_constant_steps_at_breakpoints() {
        let mut t = RateTable::new(NodeId(1), MigrationType::Sea, InterpolationType::PiecewiseConstant);
        t.add_rate(0.0, 0.1).unwrap();
        t.add_rate(18.0, 0.4).unwrap();
        t.add_rate(65.0, 0.2).unwrap();

        assert_eq!(t.get_rate(0.0), 0.1);
        assert_eq!(t.get_rate(17.99), 0.1);
        assert_eq!(t.get_rate(18.0), 0.4);
        assert_eq!(t.get_rate(64.0), 0.4);
        assert_eq!(t.get_rate(65.0), 0.2);
        assert_eq!(t.get_rate(100.0), 0.2);
    }

    #[test]
    fn non_increasing_age_rejected() {
        let mut t = RateTable::new(NodeId(1), MigrationType::Local, InterpolationType::Linear);
        t.add_rate(5.0, 0.1).unwrap();
        assert!(matches!(t.add_rate(5.0, 0.2), Err(RatesError::NonIncreasingAge { .. })));
        assert!(matches!(t.add_rate(1.0, 0.2), Err(RatesError::NonIncreasingAge { .. })));
        assert_eq!(t.num_rates(), 1);
    }

    #[test]
    fn negative_rate_rejected() {
        let mut t = RateTable::new(NodeId(1), MigrationType::Local, InterpolationType::Linear);
        assert!(matches!(t.add_rate(0.0, -0.1), Err(RatesError::InvalidRate { .. })));
        assert!(matches!(t.add_rate(0.0, f64::NAN), Err(RatesError::InvalidRate { .. })));
    }

    #[test]
    fn interpolation_type_parse() {
        assert_eq!(
            "PIECEWISE_CONSTANT".parse::<InterpolationType>().unwrap(),
            InterpolationType::PiecewiseConstant
        );
        assert!("STEP".parse::<InterpolationType>().is_err());
    }
}

// ── RateDistribution ──────────────────────────────────────────────────────────

#[cfg(test)]
mod distribution {
    use approx::assert_relative_eq;

    use super::*;
    use crate::RateDistribution;

    #[test]
    fn cdf_is_normalised_and_parallel() {
        let tables = vec![constant(1, 0.1), constant(2, 0.3), constant(3, 0.2)];
        let d = RateDistribution::from_tables(&tables, 0.0);

        assert_eq!(d.len(), 3);
        assert_eq!(d.reachable_nodes(), &[NodeId(1), NodeId(2), NodeId(3)]);
        assert_eq!(d.migration_types().len(), 3);
        assert_relative_eq!(d.total_rate(), 0.6, epsilon = 1e-12);

        let cdf = d.cumulative_distribution_function();
        assert!(cdf.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*cdf.last().unwrap(), 1.0);
        assert_relative_eq!(cdf[0], 1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(cdf[1], 4.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_total_leaves_everything_empty() {
        let tables = vec![constant(1, 0.0), constant(2, 0.0)];
        let d = RateDistribution::from_tables(&tables, 0.0);
        assert!(d.is_empty());
        assert!(d.reachable_nodes().is_empty());
        assert_eq!(d.total_rate(), 0.0);
        assert_eq!(d.select(0.0, 1.0), None);
    }

    #[test]
    fn draw_at_or_above_rate_never_migrates() {
        let d = RateDistribution::from_tables(&[constant(1, 0.5)], 0.0);
        assert_eq!(d.select(0.5, 0.5), None);
        assert_eq!(d.select(0.75, 0.5), None);
        assert!(d.select(0.49, 0.5).is_some());
    }

    /// Destination i owns (cdf[i-1], cdf[i]]; a boundary draw goes left.
    #[test]
    fn boundary_draw_tie_break_is_pinned() {
        // Power-of-two rates keep the CDF exact: [0.25, 0.5, 1.0].
        let d = RateDistribution::from_tables(
            &[constant(1, 0.125), constant(2, 0.125), constant(3, 0.25)],
            0.0,
        );
        assert_eq!(d.cumulative_distribution_function(), &[0.25, 0.5, 1.0]);

        let pick = |draw: f64| d.select(draw, d.total_rate()).map(|(n, _)| n);
        assert_eq!(pick(0.0), Some(NodeId(1)));
        assert_eq!(pick(0.124_999), Some(NodeId(1)));
        assert_eq!(pick(0.125), Some(NodeId(1))); // x == cdf[0]
        assert_eq!(pick(0.125_001), Some(NodeId(2)));
        assert_eq!(pick(0.25), Some(NodeId(2)));  // x == cdf[1]
        assert_eq!(pick(0.499_999), Some(NodeId(3)));
        assert_eq!(pick(0.5), None);
    }

    #[test]
    fn zero_width_entry_is_never_selected() {
        let d = RateDistribution::from_tables(&[constant(1, 0.0), constant(2, 0.5)], 0.0);
        assert_eq!(d.cumulative_distribution_function(), &[0.0, 1.0]);
        assert_eq!(d.select(0.0, 0.5).map(|(n, _)| n), Some(NodeId(2)));

        // [0.5, 0.5, 1.0]: the boundary belongs to the entry that ends there.
        let d = RateDistribution::from_tables(
            &[constant(1, 0.25), constant(2, 0.0), constant(3, 0.25)],
            0.0,
        );
        assert_eq!(d.cumulative_distribution_function(), &[0.5, 0.5, 1.0]);
        assert_eq!(d.select(0.25, 0.5).map(|(n, _)| n), Some(NodeId(1)));
        assert_eq!(d.select(0.25 + 1e-9, 0.5).map(|(n, _)| n), Some(NodeId(3)));
    }

    #[test]
    fn recalculation_reuses_and_replaces_lists() {
        let young_heavy = curve(1, MigrationType::Local, &[0.0, 50.0], &[1.0, 0.0]);
        let old_heavy = curve(2, MigrationType::Air, &[0.0, 50.0], &[0.0, 1.0]);
        let tables = vec![young_heavy, old_heavy];

        let mut d = RateDistribution::new();
        d.calculate_rates(&tables, 0.0);
        assert_eq!(d.cumulative_distribution_function(), &[1.0, 1.0]);
        d.calculate_rates(&tables, 50.0);
        assert_eq!(d.cumulative_distribution_function(), &[0.0, 1.0]);
        assert_eq!(d.select(0.3, 1.0), Some((NodeId(2), MigrationType::Air)));
    }
}

// ── MigrationInfo ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod migration_info {
    use approx::assert_relative_eq;
    use mig_core::{Gender, NodeRng, TravelerProfile};

    use super::*;
    use crate::{MigrationInfo, MigrationInfoKind};

    fn adult(gender: Gender) -> TravelerProfile {
        TravelerProfile::from_years(30.0, gender)
    }

    #[test]
    fn build_empty_is_null() {
        assert!(MigrationInfo::build(vec![], false, true).is_null());
        assert!(MigrationInfo::build(vec![vec![], vec![]], true, true).is_null());
    }

    #[test]
    fn build_all_zero_fixed_is_null() {
        let info = MigrationInfo::build(vec![vec![constant(1, 0.0)]], false, true);
        assert_eq!(info.kind(), MigrationInfoKind::Null);
    }

    #[test]
    fn null_reports_nothing() {
        let mut info = MigrationInfo::Null;
        let mut rng = NodeRng::new(0, NodeId(0));
        assert_eq!(info.total_rate(), 0.0);
        assert!(info.reachable_nodes(Gender::Male).is_empty());
        assert!(info.migration_types(Gender::Female).is_empty());
        assert!(info.cumulative_distribution_function(Gender::Male).is_empty());
        for _ in 0..100 {
            assert_eq!(info.pick_migration_step(&mut rng, &adult(Gender::Male)), None);
        }
        assert_eq!(info.select_destination(0.0, &adult(Gender::Male)), None);
    }

    #[test]
    fn fixed_rate_lists_are_parallel_and_gender_agnostic() {
        let info = MigrationInfo::build(
            vec![vec![constant(4, 0.2), constant(9, 0.2)]],
            false,
            true,
        );
        assert_eq!(info.kind(), MigrationInfoKind::FixedRate);
        assert_relative_eq!(info.total_rate(), 0.4);
        assert_eq!(info.reachable_nodes(Gender::Male), info.reachable_nodes(Gender::Female));
        assert_eq!(info.reachable_nodes(Gender::Male).len(), info.cumulative_distribution_function(Gender::Male).len());
        assert_eq!(info.migration_types(Gender::Male).len(), 2);
    }

    #[test]
    fn fixed_rate_pick_respects_weights() {
        // Total rate 4.0 > 1.0: every draw migrates.
        let mut info = MigrationInfo::build(
            vec![vec![constant(1, 1.0), constant(2, 3.0)]],
            false,
            false,
        );
        let mut rng = NodeRng::new(42, NodeId(0));
        let traveler = adult(Gender::Male);

        let n = 10_000;
        let mut to_two = 0;
        for _ in 0..n {
            let step = info.pick_migration_step(&mut rng, &traveler).expect("always migrates");
            assert!(step.wait_time >= 0.0);
            assert_eq!(step.migration_type, MigrationType::Local);
            if step.destination == NodeId(2) {
                to_two += 1;
            }
        }
        let frac = to_two as f64 / n as f64;
        assert!((frac - 0.75).abs() < 0.03, "got {frac}");
    }

    #[test]
    fn fixed_rate_migration_probability_matches_total_rate() {
        let mut info = MigrationInfo::build(vec![vec![constant(1, 0.1)]], false, false);
        let mut rng = NodeRng::new(9, NodeId(5));
        let traveler = adult(Gender::Female);

        let n = 20_000;
        let moved = (0..n)
            .filter(|_| info.pick_migration_step(&mut rng, &traveler).is_some())
            .count();
        let frac = moved as f64 / n as f64;
        assert!((frac - 0.1).abs() < 0.015, "got {frac}");
    }

    #[test]
    fn heterogeneity_scales_the_effective_rate() {
        let tables = vec![vec![constant(1, 0.25)]];
        let mut with = MigrationInfo::build(tables.clone(), false, true);
        let mut without = MigrationInfo::build(tables, false, false);

        let doubled = adult(Gender::Male).with_rate_modifier(2.0);
        let stay_home = adult(Gender::Male).with_rate_modifier(0.0);

        // 0.3 >= 0.25, but < 0.5 once the modifier applies.
        assert!(with.select_destination(0.3, &doubled).is_some());
        assert!(without.select_destination(0.3, &doubled).is_none());
        assert!(with.select_destination(0.0, &stay_home).is_none());
        assert!(without.select_destination(0.0, &stay_home).is_some());
    }

    #[test]
    fn age_and_gender_recomputes_per_query() {
        let child_route = curve(1, MigrationType::Local, &[0.0, 15.0, 16.0], &[0.5, 0.5, 0.0]);
        let adult_route = curve(2, MigrationType::Regional, &[0.0, 15.0, 16.0], &[0.0, 0.0, 0.5]);
        let mut info = MigrationInfo::build(vec![vec![child_route, adult_route]], true, false);
        assert_eq!(info.kind(), MigrationInfoKind::AgeAndGender);

        let child = TravelerProfile::from_years(5.0, Gender::Male);
        let grown = TravelerProfile::from_years(40.0, Gender::Male);

        assert_eq!(info.select_destination(0.1, &child), Some((NodeId(1), MigrationType::Local)));
        assert_eq!(info.cumulative_distribution_function(Gender::Male), &[1.0, 1.0]);
        assert_eq!(info.select_destination(0.1, &grown), Some((NodeId(2), MigrationType::Regional)));
        assert_eq!(info.cumulative_distribution_function(Gender::Male), &[0.0, 1.0]);
        assert_relative_eq!(info.total_rate(), 0.5);
    }

    #[test]
    fn age_and_gender_uses_female_list_only_for_females() {
        let male = vec![constant(10, 0.5)];
        let female = vec![constant(20, 0.5), constant(21, 0.5)];
        let mut info = MigrationInfo::build(vec![male, female], true, false);

        assert_eq!(info.reachable_nodes(Gender::Male), &[NodeId(10)]);
        assert_eq!(info.reachable_nodes(Gender::Female), &[NodeId(20), NodeId(21)]);
        assert_eq!(info.migration_types(Gender::Female).len(), 2);

        let him = adult(Gender::Male);
        let her = adult(Gender::Female);
        assert_eq!(info.select_destination(0.2, &him).map(|(n, _)| n), Some(NodeId(10)));
        assert_eq!(info.select_destination(0.2, &her).map(|(n, _)| n), Some(NodeId(20)));
        assert_eq!(info.select_destination(0.8, &her).map(|(n, _)| n), Some(NodeId(21)));
        assert_eq!(
            info.cumulative_distribution_function(Gender::Female).len(),
            info.reachable_nodes(Gender::Female).len()
        );
    }

    #[test]
    fn age_and_gender_without_female_list_shares_default() {
        let mut info = MigrationInfo::build(vec![vec![constant(3, 0.5)]], true, false);
        assert_eq!(info.reachable_nodes(Gender::Female), &[NodeId(3)]);
        assert!(info.select_destination(0.1, &adult(Gender::Female)).is_some());
    }

    #[test]
    fn age_and_gender_zero_rate_age_does_not_migrate() {
        let route = curve(1, MigrationType::Local, &[0.0, 10.0], &[0.0, 0.0]);
        let mut info = MigrationInfo::build(vec![vec![route]], true, false);
        let mut rng = NodeRng::new(0, NodeId(0));
        assert_eq!(info.pick_migration_step(&mut rng, &adult(Gender::Male)), None);
        assert!(info.cumulative_distribution_function(Gender::Male).is_empty());
    }

    fn assert_parallel(info: &MigrationInfo, gender: Gender) {
        let cdf = info.cumulative_distribution_function(gender);
        assert_eq!(info.reachable_nodes(gender).len(), cdf.len(), "{gender:?}");
        assert_eq!(info.migration_types(gender).len(), cdf.len(), "{gender:?}");
    }

    #[test]
    fn age_and_gender_lists_stay_parallel_across_queries() {
        let teen_route = curve(1, MigrationType::Local, &[0.0, 10.0, 20.0], &[0.0, 0.5, 0.0]);
        let male = vec![teen_route, constant(2, 0.0)];
        let female = vec![constant(3, 0.5), constant(4, 0.5), constant(5, 0.5)];
        let mut info = MigrationInfo::build(vec![male, female], true, false);
        assert!(matches!(&info, MigrationInfo::AgeAndGender(a) if a.is_gender_split()));

        // Before any query: both genders evaluated at age 0.
        assert_parallel(&info, Gender::Male);
        assert_parallel(&info, Gender::Female);
        assert!(info.reachable_nodes(Gender::Male).is_empty());
        assert_eq!(info.cumulative_distribution_function(Gender::Female).len(), 3);

        // A male query with a positive total.
        let teen = TravelerProfile::from_years(10.0, Gender::Male);
        assert_eq!(info.select_destination(0.1, &teen), Some((NodeId(1), MigrationType::Local)));
        assert_eq!(info.reachable_nodes(Gender::Male), &[NodeId(1), NodeId(2)]);
        assert_parallel(&info, Gender::Male);

        // A female query leaves the male triple alone.
        assert!(info.select_destination(0.1, &adult(Gender::Female)).is_some());
        assert_parallel(&info, Gender::Male);
        assert_parallel(&info, Gender::Female);
        assert_eq!(info.reachable_nodes(Gender::Male).len(), 2);

        // A male query whose total rate is 0.
        assert_eq!(info.select_destination(0.1, &adult(Gender::Male)), None);
        assert_parallel(&info, Gender::Male);
        assert!(info.reachable_nodes(Gender::Male).is_empty());
        assert_eq!(info.total_rate(), 0.0);
        assert_parallel(&info, Gender::Female);
    }
}

// ── merge_rate_data ───────────────────────────────────────────────────────────

#[cfg(test)]
mod merge {
    use super::*;
    use crate::merge_rate_data;

    #[test]
    fn neutral_parts_concatenate() {
        let merged = merge_rate_data([vec![vec![constant(1, 0.1)]], vec![], vec![vec![constant(2, 0.2)]]]);
        assert_eq!(merged.len(), 1);
        let dests: Vec<_> = merged[0].iter().map(|t| t.destination()).collect();
        assert_eq!(dests, vec![NodeId(1), NodeId(2)]);
    }

    #[test]
    fn split_part_makes_result_split() {
        let neutral = vec![vec![constant(1, 0.1)]];
        let split = vec![vec![constant(2, 0.2)], vec![constant(3, 0.3)]];
        let merged = merge_rate_data([neutral, split]);

        assert_eq!(merged.len(), 2);
        let male: Vec<_> = merged[0].iter().map(|t| t.destination()).collect();
        let female: Vec<_> = merged[1].iter().map(|t| t.destination()).collect();
        assert_eq!(male, vec![NodeId(1), NodeId(2)]);
        assert_eq!(female, vec![NodeId(1), NodeId(3)]);
    }

    #[test]
    fn nothing_in_nothing_out() {
        assert!(merge_rate_data(Vec::<Vec<Vec<RateTable>>>::new()).is_empty());
    }
}
