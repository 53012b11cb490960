// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Movement resolution.
//!
//! [`resolve_move`] is a pure function from the current selection, a movement
//! vector and the containers to the next selection. It never mutates focus;
//! [`NavigationState`](crate::NavigationState) applies the result.

use alloc::vec::Vec;

use bracken_spatial::{Candidate, Direction, SpatialMatcher};
use kurbo::Vec2;

use crate::config::{NavAxis, NavConfig};
use crate::container::Container;
use crate::coord::Coord;

/// Whether `coord` names a selectable inside a navigable container.
pub fn is_valid(coord: Coord, containers: &[Container]) -> bool {
    containers
        .get(coord.container())
        .is_some_and(|c| c.can_navigate() && coord.item() < c.len())
}

/// Item 0 of the first navigable container.
pub fn first_navigable(containers: &[Container]) -> Option<Coord> {
    containers
        .iter()
        .position(Container::can_navigate)
        .map(|c| Coord::new(c, 0))
}

/// Resolve one movement tick.
///
/// `movement` uses the stick convention (`y` up). Returns the new selection,
/// which equals `selection` when the move is blocked, and `None` only when no
/// container can take focus.
pub fn resolve_move(
    selection: Option<Coord>,
    movement: Vec2,
    containers: &[Container],
    config: &NavConfig,
) -> Option<Coord> {
    let Some(current) = selection.filter(|c| is_valid(*c, containers)) else {
        return first_navigable(containers);
    };
    let threshold = config.move_threshold;
    let next = match config.axis {
        NavAxis::X if movement.x.abs() >= threshold => {
            step_linear(current, signum(movement.x), containers, config)
        }
        // Down (negative stick y) advances.
        NavAxis::Y if movement.y.abs() >= threshold => {
            step_linear(current, -signum(movement.y), containers, config)
        }
        NavAxis::X | NavAxis::Y => current,
        NavAxis::ClosestMatch => match Direction::from_move(movement) {
            Some(direction) => closest_match(current, direction, containers, config),
            None => current,
        },
        NavAxis::TwoWay => match Direction::from_move(movement) {
            Some(direction) => two_way(current, direction, containers, config),
            None => current,
        },
    };
    Some(next)
}

fn signum(v: f64) -> isize {
    if v > 0.0 { 1 } else { -1 }
}

/// Step the item index by `step`, wrapping or hopping containers at an edge.
fn step_linear(current: Coord, step: isize, containers: &[Container], config: &NavConfig) -> Coord {
    let len = containers[current.container()].len();
    if let Some(next) = offset(current.item(), step, len) {
        return current.with_item(next);
    }
    if config.cycle_within {
        return current.with_item(if step > 0 { 0 } else { len - 1 });
    }
    match hop(current.container(), step, containers, config.cycle_between) {
        Some(dest) => {
            let item = if step > 0 { 0 } else { containers[dest].len() - 1 };
            Coord::new(dest, item)
        }
        None => current,
    }
}

fn offset(index: usize, step: isize, len: usize) -> Option<usize> {
    index.checked_add_signed(step).filter(|i| *i < len)
}

/// Index of the next navigable container in the direction of `step`.
///
/// Never returns `from` itself.
fn hop(from: usize, step: isize, containers: &[Container], wrap: bool) -> Option<usize> {
    let count = containers.len();
    let mut index = from;
    for _ in 1..count {
        index = match offset(index, step, count) {
            Some(i) => i,
            None if wrap => {
                if step > 0 {
                    0
                } else {
                    count - 1
                }
            }
            None => return None,
        };
        if index == from {
            return None;
        }
        if containers[index].can_navigate() {
            return Some(index);
        }
    }
    None
}

fn candidates(containers: &[Container], only: Option<usize>) -> Vec<Candidate<Coord>> {
    containers
        .iter()
        .enumerate()
        .filter(|(ci, c)| c.can_navigate() && only.is_none_or(|o| o == *ci))
        .flat_map(|(ci, c)| c.candidates(ci))
        .collect()
}

fn closest_match(
    current: Coord,
    direction: Direction,
    containers: &[Container],
    config: &NavConfig,
) -> Coord {
    let origin = containers[current.container()]
        .get(current.item())
        .and_then(|s| s.center());
    let Some(origin) = origin else {
        // Nothing measured yet; fall back to stepping along the dominant axis.
        return step_linear(current, direction.step(), containers, config);
    };
    let matcher = SpatialMatcher::with_cone(config.cone);
    let all = candidates(containers, None);
    if let Some(found) = matcher.nearest_in_direction(origin, direction.unit(), &all) {
        return found;
    }
    let wrap_pool = if config.cycle_between {
        all
    } else if config.cycle_within {
        candidates(containers, Some(current.container()))
    } else {
        return current;
    };
    matcher
        .farthest_in_direction(origin, direction.opposite().unit(), &wrap_pool)
        .unwrap_or(current)
}

fn two_way(
    current: Coord,
    direction: Direction,
    containers: &[Container],
    config: &NavConfig,
) -> Coord {
    if !direction.is_horizontal() {
        let len = containers[current.container()].len();
        return match offset(current.item(), direction.step(), len) {
            Some(next) => current.with_item(next),
            None if config.cycle_within => {
                current.with_item(if direction.step() > 0 { 0 } else { len - 1 })
            }
            None => current,
        };
    }

    let Some(dest) = hop(
        current.container(),
        direction.step(),
        containers,
        config.cycle_between,
    ) else {
        return current;
    };
    let target = &containers[dest];
    let previous_y = containers[current.container()]
        .get(current.item())
        .and_then(|s| s.center())
        .map(|p| p.y);
    let by_row = previous_y.and_then(|y| {
        let mut best: Option<(usize, f64)> = None;
        for (index, item) in target.items().iter().enumerate() {
            let Some(center) = item.center() else {
                continue;
            };
            let dy = (center.y - y).abs();
            if best.is_none_or(|(_, b)| dy < b) {
                best = Some((index, dy));
            }
        }
        best.map(|(index, _)| index)
    });
    let item = by_row.unwrap_or_else(|| current.item().min(target.len() - 1));
    Coord::new(dest, item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ContainerId;
    use crate::selectable::Selectable;
    use crate::widget::ActionId;
    use alloc::vec;
    use kurbo::Rect;

    const DOWN: Vec2 = Vec2::new(0.0, -1.0);
    const UP: Vec2 = Vec2::new(0.0, 1.0);
    const RIGHT: Vec2 = Vec2::new(1.0, 0.0);
    const LEFT: Vec2 = Vec2::new(-1.0, 0.0);

    fn column(id: u32, x: f64, rows: usize) -> Container {
        let mut c = Container::new(ContainerId(id));
        for row in 0..rows {
            let mut item = Selectable::button("item", ActionId(row as u32));
            let y = row as f64 * 2.0;
            item.set_bounds(Some(Rect::new(x, y, x + 8.0, y + 1.0)));
            c.push(item);
        }
        c
    }

    fn cfg(axis: NavAxis) -> NavConfig {
        NavConfig::with_axis(axis)
    }

    #[test]
    fn no_selection_snaps_to_first_navigable() {
        let containers = vec![Container::new(ContainerId(0)), column(1, 0.0, 2)];
        assert_eq!(
            resolve_move(None, DOWN, &containers, &cfg(NavAxis::Y)),
            Some(Coord::new(1, 0))
        );
        let empty: Vec<Container> = vec![Container::new(ContainerId(0))];
        assert_eq!(resolve_move(None, DOWN, &empty, &cfg(NavAxis::Y)), None);
    }

    #[test]
    fn y_axis_clamps_without_cycle() {
        let containers = vec![column(0, 0.0, 3)];
        let config = cfg(NavAxis::Y);
        let mut sel = Some(Coord::new(0, 0));
        sel = resolve_move(sel, DOWN, &containers, &config);
        assert_eq!(sel, Some(Coord::new(0, 1)));
        for _ in 0..3 {
            sel = resolve_move(sel, DOWN, &containers, &config);
        }
        assert_eq!(sel, Some(Coord::new(0, 2)));
        sel = resolve_move(sel, UP, &containers, &config);
        assert_eq!(sel, Some(Coord::new(0, 1)));
        // Horizontal input is ignored on the Y axis.
        assert_eq!(resolve_move(sel, RIGHT, &containers, &config), sel);
    }

    #[test]
    fn y_axis_wraps_within_container() {
        let containers = vec![column(0, 0.0, 3)];
        let config = NavConfig {
            cycle_within: true,
            ..cfg(NavAxis::Y)
        };
        assert_eq!(
            resolve_move(Some(Coord::new(0, 2)), DOWN, &containers, &config),
            Some(Coord::new(0, 0))
        );
        assert_eq!(
            resolve_move(Some(Coord::new(0, 0)), UP, &containers, &config),
            Some(Coord::new(0, 2))
        );
    }

    #[test]
    fn x_axis_hops_and_wraps_between_containers() {
        let containers = vec![column(0, 0.0, 1), column(1, 10.0, 1)];
        let config = NavConfig {
            cycle_between: true,
            ..cfg(NavAxis::X)
        };
        let sel = resolve_move(Some(Coord::new(0, 0)), RIGHT, &containers, &config);
        assert_eq!(sel, Some(Coord::new(1, 0)));
        let sel = resolve_move(sel, RIGHT, &containers, &config);
        assert_eq!(sel, Some(Coord::new(0, 0)));
    }

    #[test]
    fn hop_lands_on_last_item_moving_backwards_and_skips_empty() {
        let containers = vec![
            column(0, 0.0, 3),
            Container::new(ContainerId(1)),
            column(2, 20.0, 2),
        ];
        let config = cfg(NavAxis::Y);
        assert_eq!(
            resolve_move(Some(Coord::new(2, 0)), UP, &containers, &config),
            Some(Coord::new(0, 2))
        );
        assert_eq!(
            resolve_move(Some(Coord::new(0, 2)), DOWN, &containers, &config),
            Some(Coord::new(2, 0))
        );
        // No cross-container cycling: the last container clamps.
        assert_eq!(
            resolve_move(Some(Coord::new(2, 1)), DOWN, &containers, &config),
            Some(Coord::new(2, 1))
        );
    }

    #[test]
    fn closest_match_crosses_containers_inside_cone() {
        let containers = vec![column(0, 0.0, 3), column(1, 20.0, 3)];
        let config = cfg(NavAxis::ClosestMatch);
        assert_eq!(
            resolve_move(Some(Coord::new(0, 1)), RIGHT, &containers, &config),
            Some(Coord::new(1, 1))
        );
        assert_eq!(
            resolve_move(Some(Coord::new(1, 2)), UP, &containers, &config),
            Some(Coord::new(1, 1))
        );
        // Nothing to the left and no cycling: stay.
        assert_eq!(
            resolve_move(Some(Coord::new(0, 1)), LEFT, &containers, &config),
            Some(Coord::new(0, 1))
        );
    }

    #[test]
    fn closest_match_wraps_to_farthest_when_cycling() {
        let containers = vec![column(0, 0.0, 3), column(1, 20.0, 3)];
        let within = NavConfig {
            cycle_within: true,
            ..cfg(NavAxis::ClosestMatch)
        };
        assert_eq!(
            resolve_move(Some(Coord::new(0, 2)), DOWN, &containers, &within),
            Some(Coord::new(0, 0))
        );
        let between = NavConfig {
            cycle_between: true,
            ..cfg(NavAxis::ClosestMatch)
        };
        assert_eq!(
            resolve_move(Some(Coord::new(1, 1)), RIGHT, &containers, &between),
            Some(Coord::new(0, 1))
        );
    }

    #[test]
    fn closest_match_without_positions_steps_linearly() {
        let mut containers = vec![column(0, 0.0, 3)];
        containers[0].clear_cached_position();
        assert_eq!(
            resolve_move(
                Some(Coord::new(0, 0)),
                DOWN,
                &containers,
                &cfg(NavAxis::ClosestMatch)
            ),
            Some(Coord::new(0, 1))
        );
    }

    #[test]
    fn two_way_keeps_row_when_hopping() {
        let containers = vec![column(0, 0.0, 4), column(1, 20.0, 3)];
        let config = NavConfig {
            cycle_between: true,
            ..cfg(NavAxis::TwoWay)
        };
        assert_eq!(
            resolve_move(Some(Coord::new(0, 2)), RIGHT, &containers, &config),
            Some(Coord::new(1, 2))
        );
        // Row 3 has no twin on the right; the closest row is 2.
        assert_eq!(
            resolve_move(Some(Coord::new(0, 3)), RIGHT, &containers, &config),
            Some(Coord::new(1, 2))
        );
        assert_eq!(
            resolve_move(Some(Coord::new(0, 1)), LEFT, &containers, &config),
            Some(Coord::new(1, 1))
        );
        // Vertical movement stays in the container and clamps.
        assert_eq!(
            resolve_move(Some(Coord::new(1, 2)), DOWN, &containers, &config),
            Some(Coord::new(1, 2))
        );
    }

    #[test]
    fn inactive_selection_resets() {
        let mut containers = vec![column(0, 0.0, 2), column(1, 10.0, 2)];
        containers[0].set_active(false);
        assert_eq!(
            resolve_move(Some(Coord::new(0, 1)), DOWN, &containers, &cfg(NavAxis::Y)),
            Some(Coord::new(1, 0))
        );
    }

    #[test]
    fn selection_stays_in_bounds_for_any_sequence() {
        let containers = vec![column(0, 0.0, 3), column(1, 20.0, 1), column(2, 40.0, 2)];
        let moves = [DOWN, DOWN, RIGHT, UP, LEFT, DOWN, DOWN, DOWN, RIGHT, RIGHT, UP, UP, UP];
        for axis in [NavAxis::X, NavAxis::Y, NavAxis::ClosestMatch, NavAxis::TwoWay] {
            for (within, between) in [(false, false), (true, false), (false, true), (true, true)] {
                let config = NavConfig {
                    cycle_within: within,
                    cycle_between: between,
                    ..cfg(axis)
                };
                let mut sel = None;
                for mv in moves.iter().cycle().take(60) {
                    sel = resolve_move(sel, *mv, &containers, &config);
                    let coord = sel.unwrap();
                    assert!(coord.container() < containers.len());
                    assert!(coord.item() < containers[coord.container()].len());
                }
                // A zero move never changes anything.
                assert_eq!(resolve_move(sel, Vec2::ZERO, &containers, &config), sel);
            }
        }
    }
}
