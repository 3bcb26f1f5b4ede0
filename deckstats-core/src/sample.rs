//! Synthetic purchase logs for demos, benchmarks and tests.
//!
//! Each player's history is drawn from its own `StdRng`, seeded from a
//! BLAKE3 hash of the run seed and the player name, so adding players never
//! changes existing histories.

use std::collections::HashSet;
use std::io::Write;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::catalog::{Card, Catalog};
use crate::domain::{OrderKey, PlayerId, PurchaseRecord};

const LEGENDARY_PCT: u32 = 4;
const ETHEREAL_PCT: u32 = 12;
const CROWNS_PCT: u32 = 6;

/// Generate `players` histories of `events_per_player` purchases each.
pub fn generate(players: usize, events_per_player: usize, seed: u64) -> Vec<PurchaseRecord> {
    let catalog = Catalog::standard();
    let (legendaries, rest): (Vec<&Card>, Vec<&Card>) =
        catalog.cards().iter().partition(|c| c.is_legendary());
    let (ethereals, regular): (Vec<&Card>, Vec<&Card>) =
        rest.into_iter().partition(|c| c.is_ethereal());

    let mut records = Vec::with_capacity(players * events_per_player);
    for name in player_names(players) {
        let mut rng = player_rng(seed, name.as_str());
        let mut owned_legendaries: HashSet<String> = HashSet::new();

        for seq in 1..=events_per_player as u64 {
            let roll = rng.gen_range(0..100u32);
            let legendary = if roll < LEGENDARY_PCT {
                legendaries
                    .choose(&mut rng)
                    .copied()
                    .filter(|c| owned_legendaries.insert(c.name.clone()))
            } else {
                None
            };

            let record = match legendary {
                Some(card) => PurchaseRecord {
                    cost: None,
                    is_legendary: true,
                    ..purchase(&name, card, seq)
                },
                None if roll < LEGENDARY_PCT + ETHEREAL_PCT => {
                    let card = pick(&ethereals, &mut rng);
                    PurchaseRecord {
                        cost: None,
                        purchased_with_crowns: true,
                        is_ethereal: true,
                        ..purchase(&name, card, seq)
                    }
                }
                None => {
                    let card = pick(&regular, &mut rng);
                    PurchaseRecord {
                        purchased_with_crowns: rng.gen_range(0..100u32) < CROWNS_PCT,
                        ..purchase(&name, card, seq)
                    }
                }
            };
            records.push(record.at_row(records.len() + 1));
        }
    }
    records
}

/// Write records as a CSV snapshot the loader reads back.
pub fn write_csv<W: Write>(records: &[PurchaseRecord], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["player", "card", "order", "cost", "crowns", "ethereal", "legendary"])?;
    let yes_no = |b: bool| if b { "yes" } else { "no" };
    for r in records {
        let order = r.order.to_string();
        let cost = r.cost.map(|c| c.to_string()).unwrap_or_default();
        wtr.write_record([
            r.player.as_str(),
            r.card_name.as_str(),
            order.as_str(),
            cost.as_str(),
            yes_no(r.purchased_with_crowns),
            yes_no(r.is_ethereal),
            yes_no(r.is_legendary),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn player_names(n: usize) -> Vec<PlayerId> {
    const NAMES: [&str; 8] = [
        "Grian",
        "MumboJumbo",
        "Ethoslab",
        "Docm77",
        "Xisuma",
        "TangoTek",
        "ZombieCleo",
        "Keralis",
    ];
    (0..n)
        .map(|i| match NAMES.get(i) {
            Some(name) => PlayerId::from(*name),
            None => PlayerId::new(format!("Player {}", i + 1)),
        })
        .collect()
}

fn player_rng(seed: u64, player: &str) -> StdRng {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&seed.to_le_bytes());
    hasher.update(player.as_bytes());
    StdRng::from_seed(*hasher.finalize().as_bytes())
}

fn pick<'a>(cards: &[&'a Card], rng: &mut StdRng) -> &'a Card {
    cards[rng.gen_range(0..cards.len())]
}

fn purchase(player: &PlayerId, card: &Card, seq: u64) -> PurchaseRecord {
    PurchaseRecord {
        player: player.clone(),
        card_name: card.name.clone(),
        order: OrderKey::Sequence(seq),
        cost: card.price.map(f64::from),
        purchased_with_crowns: false,
        is_ethereal: false,
        is_legendary: false,
        row: 0,
    }
}
