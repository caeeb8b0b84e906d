use arena_domain::models::GenerationKind;
use arena_ranking::{EloCalculator, RankingService};
use proptest::prelude::*;

proptest! {
    #[test]
    fn update_is_zero_sum(winner in 100.0f64..3000.0, loser in 100.0f64..3000.0, k in 1.0f64..64.0) {
        let change = EloCalculator::new(k, 1000.0).unwrap().update(winner, loser);

        let before = change.winner_before + change.loser_before;
        let after = change.winner_after + change.loser_after;
        prop_assert!((before - after).abs() < 1e-9);
        prop_assert!(change.delta() > 0.0 && change.delta() < k);
    }

    #[test]
    fn pool_total_is_conserved(pairs in prop::collection::vec((0usize..4, 0usize..4), 0..40)) {
        let service = RankingService::default();
        let ids: Vec<_> = (0..4)
            .map(|n| service.submit(GenerationKind::Text, format!("entry {n}")).unwrap().id().clone())
            .collect();

        for (winner, loser) in pairs.into_iter().filter(|(w, l)| w != l) {
            service.record_vote(&ids[winner], &ids[loser]).unwrap();
        }

        let total: f64 = service.leaderboard(None, None).iter().map(|s| s.generation.elo_rating()).sum();
        prop_assert!((total - 4000.0).abs() < 1e-6);
    }
}
