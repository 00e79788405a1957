use crate::valuation::ValuedAction;
use crate::zone_grid::PitchZoneGrid;
use serde::{Deserialize, Serialize};

/// Accumulated risk-adjusted value per start zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneCell {
    pub total: f64,
    pub count: usize,
}

impl ZoneCell {
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// ZoneValueMap bins xT-GK values by where each action started, using the
/// same zone mapping as the grid, so it lines up cell for cell with the base
/// threat surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneValueMap {
    pub length_zones: usize,
    pub width_zones: usize,
    /// Row-major by `zx`
    pub cells: Vec<ZoneCell>,
}

impl ZoneValueMap {
    /// Build over every action, or only those of `player_id` when given.
    pub fn build<'a, I>(grid: &PitchZoneGrid, actions: I, player_id: Option<u64>) -> Self
    where
        I: IntoIterator<Item = &'a ValuedAction>,
    {
        let (n, m) = (grid.length_zones(), grid.width_zones());
        let mut cells = vec![ZoneCell::default(); n * m];

        for action in actions {
            if player_id.is_some() && action.event.player_id() != player_id {
                continue;
            }
            let (zx, zy) = grid.zone_index(action.event.start.x, action.event.start.y);
            let cell = &mut cells[zx * m + zy];
            cell.total += action.value.risk_adjusted_value;
            cell.count += 1;
        }

        Self { length_zones: n, width_zones: m, cells }
    }

    pub fn cell(&self, zx: usize, zy: usize) -> Option<&ZoneCell> {
        if zx < self.length_zones && zy < self.width_zones {
            self.cells.get(zx * self.width_zones + zy)
        } else {
            None
        }
    }

    pub fn total_actions(&self) -> usize {
        self.cells.iter().map(|c| c.count).sum()
    }

    /// Zone with the highest total value among zones that saw any action.
    pub fn hottest_zone(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.count > 0)
            .max_by(|(_, a), (_, b)| a.total.total_cmp(&b.total))
            .map(|(idx, _)| (idx / self.width_zones, idx % self.width_zones))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Event, Location, PassOutcome};
    use crate::valuation::ValuationPipeline;

    #[test]
    fn test_binning_and_filter() {
        let pipeline = ValuationPipeline::default();
        let events = vec![
            Event::pass("a", Location::new(0.01, 0.5), Location::new(0.4, 0.5), PassOutcome::Complete).by_player(1, "A"),
            Event::pass("b", Location::new(0.02, 0.55), Location::new(0.5, 0.5), PassOutcome::Complete).by_player(1, "A"),
            Event::other("c", "Goal Keeper", Location::new(0.5, 0.1)).by_player(2, "B"),
        ];
        let actions = pipeline.value_batch(events);

        let all = ZoneValueMap::build(pipeline.grid(), &actions, None);
        assert_eq!(all.total_actions(), 3);
        assert_eq!(all.cell(0, 4).unwrap().count, 2);
        assert_eq!(all.hottest_zone(), Some((0, 4)));

        let only_b = ZoneValueMap::build(pipeline.grid(), &actions, Some(2));
        assert_eq!(only_b.total_actions(), 1);
        assert_eq!(only_b.cell(6, 0).unwrap().count, 1);
        assert!(only_b.cell(12, 0).is_none());
    }

    #[test]
    fn test_empty_map() {
        let grid = PitchZoneGrid::default();
        let map = ZoneValueMap::build(&grid, std::iter::empty(), None);
        assert_eq!(map.cells.len(), 96);
        assert_eq!(map.hottest_zone(), None);
        assert_eq!(map.cell(0, 0).unwrap().mean(), 0.0);
    }
}
