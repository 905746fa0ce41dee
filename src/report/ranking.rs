use crate::core::entity::EntityId;
use crate::core::instruction::Instruction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Total USD settled with one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRanking {
    pub entity: EntityId,
    pub amount: Decimal,
}

/// Sum instruction amounts per entity, largest total first.
///
/// Entities with equal totals are listed by name, ascending, so the
/// ranking does not depend on input order.
pub fn rank_entities(instructions: &[Instruction]) -> Vec<EntityRanking> {
    let mut totals: HashMap<&EntityId, Decimal> = HashMap::new();
    for instruction in instructions {
        *totals
            .entry(instruction.entity())
            .or_insert(Decimal::ZERO) += instruction.usd_amount();
    }

    let mut ranking: Vec<EntityRanking> = totals
        .into_iter()
        .map(|(entity, amount)| EntityRanking {
            entity: entity.clone(),
            amount,
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.entity.cmp(&b.entity))
    });

    log::debug!(
        "ranked {} entities from {} instructions",
        ranking.len(),
        instructions.len()
    );
    ranking
}
