//! Hierarchical triangulation of the unit sphere.
//!
//! Level 0 is the icosahedron's 20 faces. Each level splits every triangle into
//! four by joining its edge midpoints (pushed back onto the sphere), so level `n`
//! holds `20 * 4^n` triangles. The children of triangle `i` at level `n` are
//! triangles `4i .. 4i + 4` at level `n + 1`. Grids stop at [`MAX_LEVEL`].

use celestial_core::Vector3;

pub type Triangle = [Vector3; 3];

/// Deepest level a grid will build (327,680 triangles).
pub const MAX_LEVEL: usize = 7;

const PHI: f64 = 1.618_033_988_749_895;

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn icosahedron_vertices() -> [Vector3; 12] {
    [
        Vector3::new(-1.0, PHI, 0.0),
        Vector3::new(1.0, PHI, 0.0),
        Vector3::new(-1.0, -PHI, 0.0),
        Vector3::new(1.0, -PHI, 0.0),
        Vector3::new(0.0, -1.0, PHI),
        Vector3::new(0.0, 1.0, PHI),
        Vector3::new(0.0, -1.0, -PHI),
        Vector3::new(0.0, 1.0, -PHI),
        Vector3::new(PHI, 0.0, -1.0),
        Vector3::new(PHI, 0.0, 1.0),
        Vector3::new(-PHI, 0.0, -1.0),
        Vector3::new(-PHI, 0.0, 1.0),
    ]
    .map(|v| v.normalize())
}

/// Counter-clockwise seen from outside the sphere.
fn outward(a: Vector3, b: Vector3, c: Vector3) -> Triangle {
    if (b - a).cross(&(c - a)).dot(&a) < 0.0 {
        [a, c, b]
    } else {
        [a, b, c]
    }
}

fn subdivide(t: &Triangle) -> [Triangle; 4] {
    let [a, b, c] = *t;
    let ab = (a + b).normalize();
    let bc = (b + c).normalize();
    let ca = (c + a).normalize();
    [[a, ab, ca], [ab, b, bc], [ca, bc, c], [ab, bc, ca]]
}

/// How far inside `t` the direction `v` lies; negative when outside.
fn inside_margin(t: &Triangle, v: Vector3) -> f64 {
    let [a, b, c] = *t;
    v.dot(&a.cross(&b))
        .min(v.dot(&b.cross(&c)))
        .min(v.dot(&c.cross(&a)))
}

#[derive(Debug, Clone)]
pub struct GeodesicGrid {
    levels: Vec<Vec<Triangle>>,
}

impl GeodesicGrid {
    /// Builds every level up to `max_level`, clamped to [`MAX_LEVEL`].
    pub fn new(max_level: usize) -> Self {
        let max_level = clamp_level(max_level);
        let v = icosahedron_vertices();
        let base: Vec<Triangle> = ICOSAHEDRON_FACES
            .iter()
            .map(|&[i, j, k]| outward(v[i], v[j], v[k]))
            .collect();

        let mut levels = Vec::with_capacity(max_level + 1);
        levels.push(base);
        for _ in 0..max_level {
            let next: Vec<Triangle> = levels
                .last()
                .map(|prev| prev.iter().flat_map(subdivide).collect())
                .unwrap_or_default();
            levels.push(next);
        }
        Self { levels }
    }

    pub fn max_level(&self) -> usize {
        self.levels.len() - 1
    }

    /// `20 * 4^level`, or `None` when that does not fit in a `usize`.
    pub fn triangle_count(level: usize) -> Option<usize> {
        u32::try_from(level)
            .ok()
            .and_then(|level| 4usize.checked_pow(level))
            .and_then(|n| n.checked_mul(20))
    }

    pub fn triangles(&self, level: usize) -> Option<&[Triangle]> {
        self.levels.get(level).map(Vec::as_slice)
    }

    /// Index of the level-`level` triangle containing direction `v`.
    ///
    /// Points on a shared edge go to either neighbour. Returns `None` for the
    /// zero vector or a level beyond [`max_level`](Self::max_level).
    pub fn search_zone(&self, v: Vector3, level: usize) -> Option<usize> {
        if level > self.max_level() || v.magnitude_squared() == 0.0 {
            return None;
        }
        let v = v.normalize();
        let best_of = |candidates: std::ops::Range<usize>, tris: &[Triangle]| {
            candidates
                .map(|i| (i, inside_margin(&tris[i], v)))
                .fold((0, f64::NEG_INFINITY), |best, cur| if cur.1 > best.1 { cur } else { best })
                .0
        };

        let mut index = best_of(0..20, &self.levels[0]);
        for tris in &self.levels[1..=level] {
            index = best_of(4 * index..4 * index + 4, tris);
        }
        Some(index)
    }
}

fn clamp_level(level: usize) -> usize {
    if level > MAX_LEVEL {
        log::warn!("geodesic level {} clamped to {}", level, MAX_LEVEL);
        MAX_LEVEL
    } else {
        level
    }
}

/// Owned grid rebuilt only when a deeper level is requested.
#[derive(Debug, Clone, Default)]
pub struct GeodesicGridCache {
    grid: Option<GeodesicGrid>,
}

impl GeodesicGridCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A grid with at least `max_level` levels.
    pub fn ensure_level(&mut self, max_level: usize) -> &GeodesicGrid {
        let max_level = clamp_level(max_level);
        let stale = self
            .grid
            .as_ref()
            .map_or(true, |grid| grid.max_level() < max_level);
        if stale {
            log::debug!("building geodesic grid to level {}", max_level);
            self.grid = Some(GeodesicGrid::new(max_level));
        }
        self.grid.get_or_insert_with(|| GeodesicGrid::new(max_level))
    }

    pub fn cached_level(&self) -> Option<usize> {
        self.grid.as_ref().map(GeodesicGrid::max_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_counts() {
        let grid = GeodesicGrid::new(3);
        for level in 0..=3 {
            let tris = grid.triangles(level).unwrap();
            assert_eq!(Some(tris.len()), GeodesicGrid::triangle_count(level));
        }
        assert!(grid.triangles(4).is_none());
        assert_eq!(GeodesicGrid::triangle_count(5), Some(20480));
    }

    #[test]
    fn test_triangle_count_overflow() {
        assert_eq!(GeodesicGrid::triangle_count(MAX_LEVEL), Some(327_680));
        assert_eq!(GeodesicGrid::triangle_count(40), None);
        assert_eq!(GeodesicGrid::triangle_count(usize::MAX), None);
    }

    #[test]
    fn test_levels_clamped() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut cache = GeodesicGridCache::new();
        assert_eq!(cache.ensure_level(MAX_LEVEL + 5).max_level(), MAX_LEVEL);
        assert_eq!(cache.ensure_level(usize::MAX).max_level(), MAX_LEVEL);
        assert_eq!(cache.cached_level(), Some(MAX_LEVEL));
    }

    #[test]
    fn test_vertices_on_unit_sphere() {
        let grid = GeodesicGrid::new(2);
        for tri in grid.triangles(2).unwrap() {
            for v in tri {
                assert!((v.magnitude() - 1.0).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn test_faces_wind_outward() {
        let grid = GeodesicGrid::new(1);
        for level in 0..=1 {
            for [a, b, c] in grid.triangles(level).unwrap() {
                assert!((*b - *a).cross(&(*c - *a)).dot(a) > 0.0);
            }
        }
    }

    #[test]
    fn test_search_zone_contains_point() {
        let grid = GeodesicGrid::new(4);
        let directions = [
            Vector3::new(0.3, -0.4, 0.8),
            Vector3::new(-1.0, 0.2, -0.1),
            Vector3::z_axis(),
            Vector3::new(0.01, 0.99, -0.3),
        ];
        for v in directions {
            for level in 0..=4 {
                let i = grid.search_zone(v, level).unwrap();
                let tri = &grid.triangles(level).unwrap()[i];
                assert!(inside_margin(tri, v.normalize()) >= -1e-12);
            }
        }
        assert!(grid.search_zone(Vector3::zeros(), 0).is_none());
        assert!(grid.search_zone(Vector3::x_axis(), 5).is_none());
    }

    #[test]
    fn test_cache_rebuilds_only_when_deeper() {
        let mut cache = GeodesicGridCache::new();
        assert_eq!(cache.cached_level(), None);
        assert_eq!(cache.ensure_level(2).max_level(), 2);
        assert_eq!(cache.ensure_level(1).max_level(), 2);
        assert_eq!(cache.ensure_level(3).max_level(), 3);
        assert_eq!(cache.cached_level(), Some(3));
    }
}
