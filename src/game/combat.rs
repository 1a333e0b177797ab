//! Lane combat
//!
//! During an attack phase every lane of the active player's field fights the
//! mirrored lane of the other player's field, in lane order 0 -> 1 -> 2:
//!
//! - no attacker card: nothing happens
//! - attacker card facing an empty lane: its attack hits the defending player
//! - attacker card facing a card: the attacker strikes first; a destroyed
//!   defender is removed and any overkill bleeds through to the defending
//!   player; a surviving defender strikes back, and a destroyed attacker is
//!   removed. Counter-attack overkill does not bleed through.

use crate::config::FIELD_SIZE;
use crate::core::Player;
use crate::game::GameEvent;

/// Resolve the whole attack phase of `attacker` against `defender`
pub fn resolve_attack(attacker: &mut Player, defender: &mut Player) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for lane in 0..FIELD_SIZE {
        resolve_lane(attacker, defender, lane, &mut events);
    }
    events
}

/// Resolve a single lane, appending the resulting events
pub fn resolve_lane(attacker: &mut Player, defender: &mut Player, lane: usize, events: &mut Vec<GameEvent>) {
    let (attacker_name, attack) = match attacker.field.get(lane) {
        Some(card) => (card.name.clone(), card.attack),
        None => return,
    };

    let Some(blocker) = defender.field.get_mut(lane) else {
        defender.take_damage(attack);
        events.push(GameEvent::PlayerDamage {
            player: defender.name.clone(),
            damage: attack,
            source: attacker_name,
            slot: lane,
        });
        return;
    };

    let blocker_name = blocker.name.clone();
    let excess = blocker.take_damage(attack);
    events.push(GameEvent::CardAttack {
        attacker: attacker_name.clone(),
        defender: blocker_name.clone(),
        attack_damage: attack,
        slot: lane,
    });

    if !blocker.is_alive() {
        defender.field.remove(lane);
        events.push(GameEvent::CardDestroyed {
            card: blocker_name,
            owner: defender.name.clone(),
            slot: lane,
        });
        if excess > 0 {
            defender.take_damage(excess);
            events.push(GameEvent::PlayerDamage {
                player: defender.name.clone(),
                damage: excess,
                source: attacker_name,
                slot: lane,
            });
        }
        return;
    }

    let counter = blocker.attack;
    events.push(GameEvent::CardCounterAttack {
        attacker: blocker_name,
        defender: attacker_name.clone(),
        attack_damage: counter,
        slot: lane,
    });

    let attacker_died = match attacker.field.get_mut(lane) {
        Some(card) => {
            card.take_damage(counter);
            !card.is_alive()
        }
        None => false,
    };
    if attacker_died {
        attacker.field.remove(lane);
        events.push(GameEvent::CardDestroyed {
            card: attacker_name,
            owner: attacker.name.clone(),
            slot: lane,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, Deck};

    fn players() -> (Player, Player) {
        (
            Player::new("Attacker", Deck::default(), 10, 3),
            Player::new("Defender", Deck::default(), 10, 3),
        )
    }

    #[test]
    fn test_empty_lane_hits_player() {
        let (mut attacker, mut defender) = players();
        attacker.field.place(1, Card::new("knight", "Knight", 2, 4, 3)).unwrap();

        let events = resolve_attack(&mut attacker, &mut defender);
        assert_eq!(defender.health, 6);
        assert_eq!(
            events,
            vec![GameEvent::PlayerDamage {
                player: "Defender".to_string(),
                damage: 4,
                source: "Knight".to_string(),
                slot: 1,
            }]
        );
    }

    #[test]
    fn test_overkill_bleeds_through() {
        let (mut attacker, mut defender) = players();
        attacker.field.place(0, Card::new("ogre", "Ogre", 3, 7, 4)).unwrap();
        defender.field.place(0, Card::new("imp", "Imp", 1, 1, 3)).unwrap();

        let events = resolve_attack(&mut attacker, &mut defender);
        assert!(!defender.field.is_occupied(0));
        assert_eq!(defender.health, 6);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind(), "card_attack");
        assert_eq!(events[1].kind(), "card_destroyed");
        assert!(matches!(events[2], GameEvent::PlayerDamage { damage: 4, .. }));
        // No counter-attack from a destroyed card
        assert_eq!(attacker.field.get(0).unwrap().hp, 4);
    }

    #[test]
    fn test_exact_kill_does_not_bleed() {
        let (mut attacker, mut defender) = players();
        attacker.field.place(2, Card::new("a", "A", 1, 3, 1)).unwrap();
        defender.field.place(2, Card::new("b", "B", 1, 5, 3)).unwrap();

        let events = resolve_attack(&mut attacker, &mut defender);
        assert_eq!(defender.health, 10);
        assert_eq!(events.len(), 2);
        assert!(attacker.field.is_occupied(2));
    }

    #[test]
    fn test_survivor_counter_attacks() {
        let (mut attacker, mut defender) = players();
        attacker.field.place(1, Card::new("a", "Squire", 1, 2, 5)).unwrap();
        defender.field.place(1, Card::new("b", "Wall", 2, 3, 6)).unwrap();

        let events = resolve_attack(&mut attacker, &mut defender);
        assert_eq!(defender.field.get(1).unwrap().hp, 4);
        assert_eq!(attacker.field.get(1).unwrap().hp, 2);
        assert_eq!(
            events[1],
            GameEvent::CardCounterAttack {
                attacker: "Wall".to_string(),
                defender: "Squire".to_string(),
                attack_damage: 3,
                slot: 1,
            }
        );
    }

    #[test]
    fn test_counter_kill_does_not_bleed() {
        let (mut attacker, mut defender) = players();
        attacker.field.place(0, Card::new("a", "Scout", 1, 1, 1)).unwrap();
        defender.field.place(0, Card::new("b", "Brute", 3, 9, 5)).unwrap();

        let events = resolve_attack(&mut attacker, &mut defender);
        assert!(!attacker.field.is_occupied(0));
        assert_eq!(attacker.health, 10);
        assert_eq!(defender.health, 10);
        assert_eq!(events.last().unwrap().kind(), "card_destroyed");
        assert_eq!(events.iter().filter(|e| e.kind() == "player_damage").count(), 0);
    }

    #[test]
    fn test_lanes_resolve_in_order() {
        let (mut attacker, mut defender) = players();
        attacker.field.place(2, Card::new("a", "Third", 1, 1, 1)).unwrap();
        attacker.field.place(0, Card::new("b", "First", 1, 2, 1)).unwrap();

        let events = resolve_attack(&mut attacker, &mut defender);
        let slots: Vec<usize> = events
            .iter()
            .map(|e| match e {
                GameEvent::PlayerDamage { slot, .. } => *slot,
                _ => usize::MAX,
            })
            .collect();
        assert_eq!(slots, vec![0, 2]);
        assert_eq!(defender.health, 7);
    }
}
