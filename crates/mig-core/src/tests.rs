//! Unit tests for mig-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CoreError, ExternalNodeId, NodeId, NodeIdMap};

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(ExternalNodeId::INVALID.0, u32::MAX);
        assert!(!NodeId::default().is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
        assert_eq!(ExternalNodeId(12).to_string(), "ExternalNodeId(12)");
    }

    #[test]
    fn map_assigns_dense_suids_in_order() {
        let map = NodeIdMap::from_external_ids([ExternalNodeId(10), ExternalNodeId(3), ExternalNodeId(7)])
            .unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.suid(ExternalNodeId(10)), Some(NodeId(0)));
        assert_eq!(map.suid(ExternalNodeId(3)), Some(NodeId(1)));
        assert_eq!(map.external_id(NodeId(2)), Some(ExternalNodeId(7)));
        assert_eq!(map.suid(ExternalNodeId(99)), None);
        assert_eq!(map.external_id(NodeId(3)), None);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs[1], (ExternalNodeId(3), NodeId(1)));
    }

    #[test]
    fn duplicate_external_id_rejected() {
        let result = NodeIdMap::from_external_ids([ExternalNodeId(1), ExternalNodeId(1)]);
        assert!(matches!(result, Err(CoreError::DuplicateNode(ExternalNodeId(1)))));
    }

    #[test]
    fn unused_slot_id_rejected() {
        let mut map = NodeIdMap::new();
        assert!(matches!(
            map.insert(ExternalNodeId::UNUSED),
            Err(CoreError::ReservedNodeId(_))
        ));
        assert!(map.is_empty());
    }
}

#[cfg(test)]
mod migration_type {
    use crate::MigrationType;

    #[test]
    fn parse_roundtrip_for_every_tag() {
        for t in MigrationType::FILE_TYPES {
            assert_eq!(t.as_str().parse::<MigrationType>().unwrap(), t);
        }
        assert_eq!("NO_MIGRATION".parse::<MigrationType>().unwrap(), MigrationType::None);
    }

    #[test]
    fn malformed_string_is_an_error() {
        assert!("LOCAL".parse::<MigrationType>().is_err());
        assert!("".parse::<MigrationType>().is_err());
    }

    #[test]
    fn destination_limits() {
        assert_eq!(MigrationType::Local.max_destinations(), 8);
        assert_eq!(MigrationType::Air.max_destinations(), 60);
        assert_eq!(MigrationType::Regional.max_destinations(), 30);
        assert_eq!(MigrationType::Sea.max_destinations(), 5);
        assert_eq!(MigrationType::None.max_destinations(), 0);
    }

    #[test]
    fn is_migration() {
        assert!(!MigrationType::None.is_migration());
        assert!(MigrationType::Sea.is_migration());
    }
}

#[cfg(test)]
mod sim_type {
    use crate::SimType;

    #[test]
    fn vector_family() {
        assert!(SimType::Vector.is_vector_based());
        assert!(SimType::Malaria.is_vector_based());
        assert!(SimType::Dengue.is_vector_based());
        assert!(!SimType::Generic.is_vector_based());
        assert!(!SimType::Hiv.is_vector_based());
    }

    #[test]
    fn parse() {
        assert_eq!("MALARIA_SIM".parse::<SimType>().unwrap(), SimType::Malaria);
        assert!("MALARIA".parse::<SimType>().is_err());
    }
}

#[cfg(test)]
mod traveler {
    use approx::assert_relative_eq;

    use crate::{Gender, Traveler, TravelerProfile};

    #[test]
    fn age_in_years() {
        let t = TravelerProfile::new(730.0, Gender::Female);
        assert_relative_eq!(t.age_years(), 2.0);
        assert_relative_eq!(TravelerProfile::from_years(30.0, Gender::Male).age_years(), 30.0);
    }

    #[test]
    fn default_modifier_is_one() {
        let t = TravelerProfile::new(0.0, Gender::Male);
        assert_eq!(t.migration_rate_modifier(), 1.0);
        assert_eq!(t.with_rate_modifier(2.5).migration_rate_modifier(), 2.5);
    }

    #[test]
    fn gender_chunk_index() {
        assert_eq!(Gender::Male.index(), 0);
        assert_eq!(Gender::Female.index(), 1);
    }
}

#[cfg(test)]
mod rng {
    use crate::{NodeId, NodeRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = NodeRng::new(12345, NodeId(0));
        let mut r2 = NodeRng::new(12345, NodeId(0));
        for _ in 0..100 {
            assert_eq!(r1.uniform(), r2.uniform());
        }
    }

    #[test]
    fn different_nodes_differ() {
        let mut r0 = NodeRng::new(1, NodeId(0));
        let mut r1 = NodeRng::new(1, NodeId(1));
        assert_ne!(r0.uniform(), r1.uniform(), "seeds for adjacent nodes should diverge");
    }

    #[test]
    fn uniform_in_unit_interval() {
        let mut rng = NodeRng::new(0, NodeId(0));
        for _ in 0..1000 {
            let v = rng.uniform();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn exponential_mean_matches_rate() {
        let mut rng = NodeRng::new(7, NodeId(3));
        let n = 20_000;
        let mean = (0..n).map(|_| rng.exponential(0.5)).sum::<f64>() / n as f64;
        assert!((mean - 2.0).abs() < 0.1, "got {mean}");
    }

    #[test]
    fn exponential_zero_rate_never_fires() {
        let mut rng = NodeRng::new(0, NodeId(0));
        assert_eq!(rng.exponential(0.0), f64::INFINITY);
        assert_eq!(rng.exponential(f64::NAN), f64::INFINITY);
    }

    #[test]
    fn sim_rng_gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}
