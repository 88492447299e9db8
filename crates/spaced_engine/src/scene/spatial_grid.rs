//! Cell-grid spatial partition
//!
//! A fixed rows x cols grid of square cells covering a bounded region of
//! the XZ plane, plus an overflow list for entities outside it. Every
//! tracked entity lives in exactly one cell or the overflow list. The
//! per-frame sweep runs each entity's behavior, re-classifies it, and
//! stages any membership change into a side table that is applied only
//! after the sweep, so an entity is never updated twice or skipped because
//! it moved into a cell the sweep had not reached yet.
//!
//! Behaviors may stage spawns and despawns through their `UpdateContext`;
//! those intents are applied after the migrations, so the grid's
//! containers are never structurally mutated while being iterated.

use std::collections::HashMap;
use std::rc::Rc;

use crate::entity::{EntityHandle, FrameInput, GameEntity, UpdateContext};
use crate::foundation::math::Vec3;

/// Grid shape, fixed at construction
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Number of cell rows (Z axis)
    pub rows: usize,

    /// Number of cell columns (X axis)
    pub cols: usize,

    /// Side length of each square cell in world units
    pub cell_size: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            cols: 6,
            cell_size: 15.0,
        }
    }
}

/// Row/column address of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoords {
    /// Row index (Z axis)
    pub row: usize,

    /// Column index (X axis)
    pub col: usize,
}

/// Where a tracked entity currently lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Residency {
    /// Inside the bounded region, in the given cell
    Cell(CellCoords),

    /// Outside the bounded region
    OutOfBounds,
}

/// One square region of the grid
///
/// Residents are stored in arbitrary order; removal swap-erases, so
/// ordering is not preserved across frames.
#[derive(Debug)]
pub struct Cell {
    center_x: f32,
    center_z: f32,
    residents: Vec<EntityHandle>,
}

impl Cell {
    /// World-space X of the cell center
    pub fn center_x(&self) -> f32 {
        self.center_x
    }

    /// World-space Z of the cell center
    pub fn center_z(&self) -> f32 {
        self.center_z
    }

    /// Entities currently resident in this cell
    pub fn residents(&self) -> &[EntityHandle] {
        &self.residents
    }
}

/// The spatial partition: cells plus the out-of-bounds overflow list
pub struct SpatialGrid {
    config: GridConfig,
    cells: Vec<Cell>,
    out_of_bounds: Vec<EntityHandle>,
}

impl SpatialGrid {
    /// Create a grid; cells are laid out once and never destroyed
    pub fn new(config: GridConfig) -> Self {
        assert!(config.rows > 0 && config.cols > 0, "grid must have cells");
        assert!(config.cell_size > 0.0, "cell_size must be positive");

        let (half_x, half_z) = (
            config.cols as f32 * config.cell_size / 2.0,
            config.rows as f32 * config.cell_size / 2.0,
        );

        let mut cells = Vec::with_capacity(config.rows * config.cols);
        for row in 0..config.rows {
            for col in 0..config.cols {
                cells.push(Cell {
                    center_x: col as f32 * config.cell_size - half_x,
                    center_z: row as f32 * config.cell_size - half_z,
                    residents: Vec::new(),
                });
            }
        }

        Self {
            config,
            cells,
            out_of_bounds: Vec::new(),
        }
    }

    /// Grid shape
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    fn cell_index(&self, coords: CellCoords) -> usize {
        coords.row * self.config.cols + coords.col
    }

    fn half_extents(&self) -> (f32, f32) {
        (
            self.config.cols as f32 * self.config.cell_size / 2.0,
            self.config.rows as f32 * self.config.cell_size / 2.0,
        )
    }

    /// Whether a translation falls outside the bounded region
    ///
    /// Each axis is tested against its own half-extent; positions exactly
    /// on the boundary are in-bounds.
    pub fn is_out_of_bounds(&self, translation: Vec3) -> bool {
        let (half_x, half_z) = self.half_extents();
        let half_cell = self.config.cell_size / 2.0;

        translation.x + half_cell < -half_x
            || translation.x + half_cell > half_x
            || translation.z + half_cell < -half_z
            || translation.z + half_cell > half_z
    }

    /// Cell address for a translation
    ///
    /// Total over all finite positions: indices are clamped into range, so
    /// an in-bounds classification always yields a valid cell.
    pub fn cell_coords(&self, translation: Vec3) -> CellCoords {
        let (half_x, half_z) = self.half_extents();
        let half_cell = self.config.cell_size / 2.0;

        let col = ((translation.x + half_cell + half_x) / self.config.cell_size).floor() as i64;
        let row = ((translation.z + half_cell + half_z) / self.config.cell_size).floor() as i64;

        CellCoords {
            row: row.clamp(0, self.config.rows as i64 - 1) as usize,
            col: col.clamp(0, self.config.cols as i64 - 1) as usize,
        }
    }

    /// Track an entity, placing it in its cell or the overflow list
    pub fn insert(&mut self, entity: EntityHandle) {
        let translation = entity.borrow().state.translation();

        if self.is_out_of_bounds(translation) {
            self.out_of_bounds.push(entity);
            return;
        }

        let coords = self.cell_coords(translation);
        let index = self.cell_index(coords);
        self.cells[index].residents.push(entity);
    }

    /// Run one frame: update every entity, then apply staged membership
    /// changes, spawns and despawns
    pub fn update(&mut self, delta_time: f32, frame: &FrameInput) {
        // Side table of cell moves, keyed by destination cell.
        let mut migrations: HashMap<CellCoords, Vec<EntityHandle>> = HashMap::new();
        let mut spawned: Vec<GameEntity> = Vec::new();
        let mut despawned: Vec<EntityHandle> = Vec::new();

        // Overflow entities first: any that crossed back into the bounded
        // region are staged for their computed cell.
        let mut i = 0;
        while i < self.out_of_bounds.len() {
            let handle = Rc::clone(&self.out_of_bounds[i]);
            let mut ctx = UpdateContext::new(delta_time, frame, &[]);
            handle.borrow_mut().update(&mut ctx);
            ctx.drain_into(&mut spawned, &mut despawned);

            let translation = handle.borrow().state.translation();
            if self.is_out_of_bounds(translation) {
                i += 1;
            } else {
                let coords = self.cell_coords(translation);
                self.out_of_bounds.swap_remove(i);
                migrations.entry(coords).or_default().push(handle);
            }
        }

        // Cell sweep, row-major. The resident list is snapshotted per cell
        // so behaviors can inspect their neighbors while the list mutates
        // under the sweep's swap-removes.
        for row in 0..self.config.rows {
            for col in 0..self.config.cols {
                let index = row * self.config.cols + col;
                let neighbors: Vec<EntityHandle> = self.cells[index].residents.clone();

                let mut i = 0;
                while i < self.cells[index].residents.len() {
                    let handle = Rc::clone(&self.cells[index].residents[i]);
                    let mut ctx = UpdateContext::new(delta_time, frame, &neighbors);
                    handle.borrow_mut().update(&mut ctx);
                    ctx.drain_into(&mut spawned, &mut despawned);

                    let (translation, destroy_when_oob) = {
                        let entity = handle.borrow();
                        (
                            entity.state.translation(),
                            entity.state.destroy_when_out_of_bounds(),
                        )
                    };

                    if self.is_out_of_bounds(translation) {
                        let removed = self.cells[index].residents.swap_remove(i);
                        if destroy_when_oob {
                            log::debug!("Dropping entity leaving bounds at {:?}", translation);
                        } else {
                            self.out_of_bounds.push(removed);
                        }
                        continue;
                    }

                    let coords = self.cell_coords(translation);
                    if coords.row != row || coords.col != col {
                        let removed = self.cells[index].residents.swap_remove(i);
                        migrations.entry(coords).or_default().push(removed);
                        continue;
                    }

                    i += 1;
                }
            }
        }

        // Apply the staged moves now that the sweep is over.
        for (coords, handles) in migrations {
            let index = self.cell_index(coords);
            self.cells[index].residents.extend(handles);
        }

        for entity in spawned {
            self.insert(entity.into_handle());
        }

        for handle in despawned {
            self.remove(&handle);
        }
    }

    /// Untrack an entity immediately (collision kills etc.)
    ///
    /// Locates the entity by scanning the cells and the overflow list.
    /// Returns false if the entity is not tracked.
    pub fn remove(&mut self, entity: &EntityHandle) -> bool {
        for cell in &mut self.cells {
            if let Some(pos) = cell.residents.iter().position(|e| Rc::ptr_eq(e, entity)) {
                cell.residents.swap_remove(pos);
                return true;
            }
        }

        if let Some(pos) = self
            .out_of_bounds
            .iter()
            .position(|e| Rc::ptr_eq(e, entity))
        {
            self.out_of_bounds.swap_remove(pos);
            return true;
        }

        false
    }

    /// Number of tracked entities (cells plus overflow)
    pub fn len(&self) -> usize {
        self.cells.iter().map(|c| c.residents.len()).sum::<usize>() + self.out_of_bounds.len()
    }

    /// Whether the grid tracks no entities
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Visit every in-bounds resident, grouped by cell in row-major order
    pub fn for_each_resident<F>(&self, mut visitor: F)
    where
        F: FnMut(CellCoords, &EntityHandle),
    {
        for row in 0..self.config.rows {
            for col in 0..self.config.cols {
                let coords = CellCoords { row, col };
                for entity in &self.cells[self.cell_index(coords)].residents {
                    visitor(coords, entity);
                }
            }
        }
    }

    /// Entities currently outside the bounded region
    pub fn out_of_bounds_entities(&self) -> &[EntityHandle] {
        &self.out_of_bounds
    }

    /// Debug accessor: entity by linear index (row-major cells, then the
    /// overflow list). `None` past the live count.
    pub fn entity_at(&self, index: usize) -> Option<EntityHandle> {
        let mut remaining = index;
        for cell in &self.cells {
            if remaining < cell.residents.len() {
                return Some(Rc::clone(&cell.residents[remaining]));
            }
            remaining -= cell.residents.len();
        }
        self.out_of_bounds.get(remaining).cloned()
    }

    /// Debug accessor: remove an entity by linear index
    pub fn remove_entity_at(&mut self, index: usize) -> Option<EntityHandle> {
        let handle = self.entity_at(index)?;
        self.remove(&handle);
        Some(handle)
    }

    /// Where a tracked entity currently lives, `None` if untracked
    pub fn residency(&self, entity: &EntityHandle) -> Option<Residency> {
        for row in 0..self.config.rows {
            for col in 0..self.config.cols {
                let coords = CellCoords { row, col };
                let index = self.cell_index(coords);
                if self.cells[index]
                    .residents
                    .iter()
                    .any(|e| Rc::ptr_eq(e, entity))
                {
                    return Some(Residency::Cell(coords));
                }
            }
        }

        if self.out_of_bounds.iter().any(|e| Rc::ptr_eq(e, entity)) {
            return Some(Residency::OutOfBounds);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ModelId;
    use crate::entity::{Behavior, EntityFlags, EntityState, UpdateContext};
    use crate::foundation::math::Dimensions;

    fn inert_at(x: f32, z: f32) -> EntityHandle {
        GameEntity::new(EntityState::at(
            ModelId::default(),
            Dimensions::new(2.0, 2.0, 2.0),
            EntityFlags::empty(),
            Vec3::new(x, 0.0, z),
        ))
        .into_handle()
    }

    fn count_occurrences(grid: &SpatialGrid, entity: &EntityHandle) -> usize {
        let in_cells: usize = grid
            .cells()
            .map(|c| {
                c.residents()
                    .iter()
                    .filter(|e| Rc::ptr_eq(e, entity))
                    .count()
            })
            .sum();
        let in_overflow = grid
            .out_of_bounds_entities()
            .iter()
            .filter(|e| Rc::ptr_eq(e, entity))
            .count();
        in_cells + in_overflow
    }

    /// Moves the entity to a fixed position on its first update.
    struct MoveOnce {
        target: Option<Vec3>,
    }

    impl MoveOnce {
        fn to(target: Vec3) -> Box<Self> {
            Box::new(Self {
                target: Some(target),
            })
        }
    }

    impl Behavior for MoveOnce {
        fn update(&mut self, state: &mut EntityState, _ctx: &mut UpdateContext<'_>) {
            if let Some(target) = self.target.take() {
                state.transform.translation = target;
            }
        }
    }

    #[test]
    fn origin_lands_in_the_center_cell() {
        let grid = SpatialGrid::new(GridConfig::default());
        let coords = grid.cell_coords(Vec3::zeros());
        assert_eq!(coords, CellCoords { row: 3, col: 3 });
    }

    #[test]
    fn scenario_leave_and_reenter_bounds() {
        // 6x6 cells of size 15: the world spans -45..45 on X and Z.
        let mut grid = SpatialGrid::new(GridConfig::default());
        let entity = inert_at(0.0, 0.0);
        grid.insert(Rc::clone(&entity));

        assert_eq!(
            grid.residency(&entity),
            Some(Residency::Cell(CellCoords { row: 3, col: 3 }))
        );

        entity.borrow_mut().state.transform.translation = Vec3::new(100.0, 0.0, 0.0);
        grid.update(0.0, &FrameInput::default());
        assert_eq!(grid.residency(&entity), Some(Residency::OutOfBounds));

        entity.borrow_mut().state.transform.translation = Vec3::zeros();
        grid.update(0.0, &FrameInput::default());
        assert_eq!(
            grid.residency(&entity),
            Some(Residency::Cell(CellCoords { row: 3, col: 3 }))
        );
    }

    #[test]
    fn migration_lands_in_exactly_the_destination_cell() {
        let mut grid = SpatialGrid::new(GridConfig::default());

        // Cell (2, 2) covers the region around (-15, -15); cell (4, 4)
        // the region around (15, 15).
        let start = Vec3::new(-15.0, 0.0, -15.0);
        assert_eq!(grid.cell_coords(start), CellCoords { row: 2, col: 2 });

        let entity = GameEntity::with_behavior(
            EntityState::at(
                ModelId::default(),
                Dimensions::new(2.0, 2.0, 2.0),
                EntityFlags::empty(),
                start,
            ),
            MoveOnce::to(Vec3::new(15.0, 0.0, 15.0)),
        )
        .into_handle();
        grid.insert(Rc::clone(&entity));

        grid.update(0.016, &FrameInput::default());

        assert_eq!(
            grid.residency(&entity),
            Some(Residency::Cell(CellCoords { row: 4, col: 4 }))
        );
        assert_eq!(count_occurrences(&grid, &entity), 1);
    }

    #[test]
    fn update_is_idempotent_for_static_entities() {
        let mut grid = SpatialGrid::new(GridConfig::default());
        let entities: Vec<EntityHandle> = [(0.0, 0.0), (-40.0, 40.0), (20.0, -3.0)]
            .iter()
            .map(|&(x, z)| {
                let e = inert_at(x, z);
                grid.insert(Rc::clone(&e));
                e
            })
            .collect();

        let before: Vec<_> = entities.iter().map(|e| grid.residency(e)).collect();
        for _ in 0..5 {
            grid.update(0.0, &FrameInput::default());
        }
        let after: Vec<_> = entities.iter().map(|e| grid.residency(e)).collect();

        assert_eq!(before, after);
        assert_eq!(grid.len(), entities.len());
    }

    #[test]
    fn partition_invariant_holds_after_updates() {
        let mut grid = SpatialGrid::new(GridConfig::default());
        let positions = [
            (0.0, 0.0),
            (-44.9, -44.9),
            (37.5, 37.5), // exactly on the boundary: in-bounds
            (60.0, 0.0),  // outside
            (-3.0, 12.0),
        ];

        let entities: Vec<EntityHandle> = positions
            .iter()
            .map(|&(x, z)| {
                let e = inert_at(x, z);
                grid.insert(Rc::clone(&e));
                e
            })
            .collect();

        grid.update(0.0, &FrameInput::default());
        grid.update(0.0, &FrameInput::default());

        for entity in &entities {
            assert_eq!(count_occurrences(&grid, entity), 1);
            assert!(grid.residency(entity).is_some());
        }

        // The visitor covers every in-bounds resident exactly once.
        let mut visited = 0;
        grid.for_each_resident(|_, _| visited += 1);
        assert_eq!(visited + grid.out_of_bounds_entities().len(), grid.len());
    }

    #[test]
    fn in_bounds_classification_always_yields_a_valid_cell() {
        let grid = SpatialGrid::new(GridConfig::default());

        // Sample positions including the exact boundary, where the strict
        // bounds test keeps the position in-bounds and the clamp keeps the
        // index valid.
        for &x in &[-52.4, -45.0, -37.5, 0.0, 14.9, 37.5, 44.99] {
            for &z in &[-52.4, -45.0, 0.0, 37.5, 44.99] {
                let p = Vec3::new(x, 0.0, z);
                if !grid.is_out_of_bounds(p) {
                    let coords = grid.cell_coords(p);
                    assert!(coords.row < 6, "row out of range for {:?}", p);
                    assert!(coords.col < 6, "col out of range for {:?}", p);
                }
            }
        }
    }

    #[test]
    fn bounds_test_uses_each_axis_own_extent() {
        // A non-square grid: 4 rows (Z) x 8 cols (X) of size 10, so X
        // spans -40..40 and Z spans -20..20.
        let grid = SpatialGrid::new(GridConfig {
            rows: 4,
            cols: 8,
            cell_size: 10.0,
        });

        // In on X where the wider extent allows it...
        assert!(!grid.is_out_of_bounds(Vec3::new(35.0, 0.0, 0.0)));
        assert!(grid.cell_coords(Vec3::new(35.0, 0.0, 0.0)).col < 8);

        // ...but the same offset on Z is outside the narrower extent.
        assert!(grid.is_out_of_bounds(Vec3::new(0.0, 0.0, 35.0)));

        // And the Z bound is the Z extent, not the X extent.
        assert!(!grid.is_out_of_bounds(Vec3::new(0.0, 0.0, 14.9)));
        assert!(grid.is_out_of_bounds(Vec3::new(0.0, 0.0, 15.1)));
    }

    #[test]
    fn flagged_entities_are_dropped_when_leaving_bounds() {
        let mut grid = SpatialGrid::new(GridConfig::default());
        let projectile = GameEntity::with_behavior(
            EntityState::at(
                ModelId::default(),
                Dimensions::new(1.0, 1.0, 2.0),
                EntityFlags::PROJECTILE | EntityFlags::DESTROY_WHEN_OUT_OF_BOUNDS,
                Vec3::new(0.0, 0.0, -40.0),
            ),
            MoveOnce::to(Vec3::new(0.0, 0.0, -200.0)),
        )
        .into_handle();
        grid.insert(Rc::clone(&projectile));
        assert_eq!(grid.len(), 1);

        grid.update(0.016, &FrameInput::default());

        assert_eq!(grid.len(), 0);
        assert_eq!(grid.residency(&projectile), None);
        assert!(grid.out_of_bounds_entities().is_empty());
    }

    struct SpawnEachUpdate;

    impl Behavior for SpawnEachUpdate {
        fn update(&mut self, state: &mut EntityState, ctx: &mut UpdateContext<'_>) {
            let mut spawn_state = state.clone();
            spawn_state.transform.translation.z += 5.0;
            ctx.spawn(GameEntity::new(spawn_state));
        }
    }

    #[test]
    fn staged_spawns_are_applied_after_the_sweep() {
        let mut grid = SpatialGrid::new(GridConfig::default());
        let spawner = GameEntity::with_behavior(
            EntityState::at(
                ModelId::default(),
                Dimensions::new(2.0, 2.0, 2.0),
                EntityFlags::empty(),
                Vec3::zeros(),
            ),
            Box::new(SpawnEachUpdate),
        )
        .into_handle();
        grid.insert(spawner);

        grid.update(0.016, &FrameInput::default());
        assert_eq!(grid.len(), 2);

        // The freshly spawned inert entity also updates next frame without
        // spawning anything of its own.
        grid.update(0.016, &FrameInput::default());
        assert_eq!(grid.len(), 3);
    }

    struct DespawnNeighbors;

    impl Behavior for DespawnNeighbors {
        fn update(&mut self, _state: &mut EntityState, ctx: &mut UpdateContext<'_>) {
            for neighbor in ctx.neighbors {
                // The updating entity itself is mutably borrowed; skip it.
                if neighbor.try_borrow().is_ok() {
                    ctx.despawn(neighbor);
                }
            }
        }
    }

    #[test]
    fn staged_despawns_remove_cell_neighbors() {
        let mut grid = SpatialGrid::new(GridConfig::default());

        let victim = inert_at(1.0, 1.0);
        grid.insert(Rc::clone(&victim));

        let killer = GameEntity::with_behavior(
            EntityState::at(
                ModelId::default(),
                Dimensions::new(2.0, 2.0, 2.0),
                EntityFlags::empty(),
                Vec3::new(-1.0, 0.0, -1.0),
            ),
            Box::new(DespawnNeighbors),
        )
        .into_handle();
        grid.insert(Rc::clone(&killer));

        grid.update(0.016, &FrameInput::default());

        assert_eq!(grid.residency(&victim), None);
        assert!(grid.residency(&killer).is_some());
    }

    #[test]
    fn remove_untracks_exactly_once() {
        let mut grid = SpatialGrid::new(GridConfig::default());
        let entity = inert_at(10.0, 10.0);
        grid.insert(Rc::clone(&entity));

        assert!(grid.remove(&entity));
        assert!(!grid.remove(&entity));
        assert!(grid.is_empty());
    }

    #[test]
    fn linear_index_lookup_misses_return_none() {
        let mut grid = SpatialGrid::new(GridConfig::default());
        grid.insert(inert_at(0.0, 0.0));
        grid.insert(inert_at(100.0, 0.0)); // overflow

        assert!(grid.entity_at(0).is_some());
        assert!(grid.entity_at(1).is_some());
        assert!(grid.entity_at(2).is_none());
        assert!(grid.remove_entity_at(7).is_none());

        assert!(grid.remove_entity_at(1).is_some());
        assert_eq!(grid.len(), 1);
    }
}
