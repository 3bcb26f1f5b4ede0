//! Property tests for derivation and interaction invariants.
//!
//! Uses proptest to verify:
//! 1. Monotonic deck size: size never decreases along a series
//! 2. Efficiency consistency: efficiency equals power / size whenever size > 0
//! 3. Cost precedence: a crown purchase is priced by the crown rule regardless of other flags
//! 4. Partition isolation: one player's series ignores every other player's records
//! 5. Isolation toggle: clicking the same hovered line twice is a no-op
//! 6. Hover exclusivity: at most one line is hovered and it is always visible

use proptest::prelude::*;
use deckstats_core::derive::{derive_series, DeriveOptions};
use deckstats_core::domain::{OrderKey, PlayerId, PurchaseRecord};
use deckstats_core::interaction::{InteractionEvent, InteractionState};
use deckstats_core::pricing::{PowerModel, PricingParams, PricingRules, RuleKind, SizeWeights};

// ── Strategies (proptest) ────────────────────────────────────────────

const PLAYERS: [&str; 4] = ["Alpha", "Bravo", "Charlie", "Delta"];

fn arb_record() -> impl Strategy<Value = PurchaseRecord> {
    (
        0..PLAYERS.len(),
        0..50u64,
        0.0..100.0_f64,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(p, order, cost, crowns, ethereal, legendary)| PurchaseRecord {
            player: PlayerId::from(PLAYERS[p]),
            card_name: "Card".into(),
            order: OrderKey::Sequence(order),
            cost: Some((cost * 100.0).round() / 100.0),
            purchased_with_crowns: crowns,
            is_ethereal: ethereal,
            is_legendary: legendary,
            row: 0,
        })
}

fn arb_log() -> impl Strategy<Value = Vec<PurchaseRecord>> {
    prop::collection::vec(arb_record(), 0..60).prop_map(|mut records| {
        for (i, r) in records.iter_mut().enumerate() {
            r.row = i + 1;
        }
        records
    })
}

fn arb_options() -> impl Strategy<Value = DeriveOptions> {
    (0.0..50.0_f64, 0.0..1000.0_f64, 0.0..50.0_f64, 0..3u32, 0..3u32).prop_map(
        |(crown, legendary, ethereal, normal_w, ethereal_w)| DeriveOptions {
            pricing: PricingRules::new(PricingParams {
                crown_equivalent: crown,
                legendary_power: legendary,
                ethereal_power: ethereal,
            }),
            sizing: SizeWeights {
                normal: normal_w,
                ethereal: ethereal_w,
            },
            power: PowerModel::default(),
        },
    )
}

fn arb_event() -> impl Strategy<Value = InteractionEvent> {
    prop_oneof![
        4 => prop::option::of(0..PLAYERS.len())
            .prop_map(|p| InteractionEvent::Hover(p.map(|i| PlayerId::from(PLAYERS[i])))),
        3 => Just(InteractionEvent::Click),
        2 => (0..PLAYERS.len()).prop_map(|i| InteractionEvent::Isolate(PlayerId::from(PLAYERS[i]))),
        1 => Just(InteractionEvent::Reset),
    ]
}

// ── 1–2. Series shape ────────────────────────────────────────────────

proptest! {
    #[test]
    fn deck_size_is_monotonic(records in arb_log(), opts in arb_options()) {
        let derivation = derive_series(&records, &opts);
        prop_assert!(derivation.is_clean());
        for series in &derivation.series {
            for pair in series.points.windows(2) {
                prop_assert!(pair[1].deck_size >= pair[0].deck_size);
            }
        }
    }

    #[test]
    fn efficiency_matches_power_over_size(records in arb_log(), opts in arb_options()) {
        for series in derive_series(&records, &opts).series {
            for p in &series.points {
                match p.deck_efficiency {
                    Some(eff) => {
                        prop_assert!(p.deck_size > 0);
                        let expected = p.deck_power / f64::from(p.deck_size);
                        prop_assert!((eff - expected).abs() < 1e-9);
                    }
                    None => prop_assert_eq!(p.deck_size, 0),
                }
            }
        }
    }

    #[test]
    fn one_point_per_purchase(records in arb_log()) {
        let derivation = derive_series(&records, &DeriveOptions::default());
        let total: usize = derivation.series.iter().map(|s| s.len()).sum();
        prop_assert_eq!(total, records.len());
    }
}

// ── 3. Cost precedence ───────────────────────────────────────────────

proptest! {
    #[test]
    fn crowns_take_precedence(mut record in arb_record(), params in arb_options()) {
        record.purchased_with_crowns = true;
        let priced = params.pricing.price(&record).unwrap();
        prop_assert_eq!(priced.rule, Some(RuleKind::Crowns));
        prop_assert_eq!(priced.power, params.pricing.rules()[0].power);
    }

    #[test]
    fn uncovered_records_use_cost(mut record in arb_record()) {
        record.purchased_with_crowns = false;
        record.is_legendary = false;
        record.is_ethereal = false;
        let priced = PricingRules::default().price(&record).unwrap();
        prop_assert_eq!(priced.rule, None);
        prop_assert_eq!(Some(priced.power), record.cost);
    }
}

// ── 4. Partition isolation ───────────────────────────────────────────

proptest! {
    #[test]
    fn partitions_are_independent(records in arb_log(), opts in arb_options()) {
        let full = derive_series(&records, &opts);
        for player in PLAYERS {
            let id = PlayerId::from(player);
            let own: Vec<PurchaseRecord> =
                records.iter().filter(|r| r.player == id).cloned().collect();
            let alone = derive_series(&own, &opts);
            prop_assert_eq!(full.get(&id), alone.get(&id));
        }
    }
}

// ── 5–6. Interaction ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn double_click_is_a_no_op(events in prop::collection::vec(arb_event(), 0..30), target in 0..PLAYERS.len()) {
        let mut state = InteractionState::new();
        for e in events {
            state = state.apply(e);
        }
        let line = PlayerId::from(PLAYERS[target]);
        let hovered = state.clone().apply(InteractionEvent::Hover(Some(line.clone())));
        prop_assume!(hovered.hovered.is_some());

        let twice = hovered
            .clone()
            .apply(InteractionEvent::Click)
            .apply(InteractionEvent::Click);
        prop_assert_eq!(twice, hovered);
    }

    #[test]
    fn hover_is_exclusive_and_visible(events in prop::collection::vec(arb_event(), 0..50)) {
        let mut state = InteractionState::new();
        for e in events {
            state = state.apply(e);
            let hovered: Vec<&str> = PLAYERS
                .iter()
                .copied()
                .filter(|p| state.is_hovered(&PlayerId::from(*p)))
                .collect();
            prop_assert!(hovered.len() <= 1);
            if let Some(h) = &state.hovered {
                prop_assert!(state.is_visible(h));
            }
        }
    }
}
