use crate::error::{Result, RrtError};
use crate::rrt::state::Configuration;
use kiddo::float::{distance::SquaredEuclidean, kdtree::Axis, kdtree::KdTree};
use num_traits::Float;

/// Returns the index of the node in `nodes` closest to `query`.
///
/// Linear scan over all nodes. Ties resolve to the lowest index.
///
/// Fails with `EmptyTree` if `nodes` is empty and with `DimensionMismatch` if
/// any node has a different dimensionality than `query`.
pub fn nearest<F: Float>(query: &Configuration<F>, nodes: &[Configuration<F>]) -> Result<usize> {
    let mut nearest: Option<(usize, F)> = None;
    for (index, node) in nodes.iter().enumerate() {
        let dist_squared = query.distance_squared(node)?;
        match nearest {
            Some((_, shortest)) if !(dist_squared < shortest) => {}
            _ => nearest = Some((index, dist_squared)),
        }
    }
    nearest.map(|(index, _)| index).ok_or(RrtError::EmptyTree)
}

/// A nearest neighbor data structure over configurations.
/// Stores configurations and a usize index along with them.
pub trait NearestNeighbors<F: Float> {
    /// Constructs a new nearest neighbor data structure.
    /// The data structure is empty initially.
    fn new() -> Self;

    /// Adds a configuration to the data structure.
    ///
    /// Parameters:
    /// - `state`: The configuration to add.
    /// - `item`: The index of the configuration.
    fn add(&mut self, state: &Configuration<F>, item: usize) -> Result<()>;

    /// Gets the item/index of the nearest neighbor to the given configuration.
    ///
    /// Fails with `EmptyTree` if nothing has been added.
    fn nearest_one(&self, state: &Configuration<F>) -> Result<usize>;

    /// The number of stored configurations.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A nearest neighbor data structure that uses a linear search to find the nearest neighbor.
/// This is useful for small datasets.
pub struct LinearNearestNeighbors<F: Float> {
    states: Vec<Configuration<F>>,
    items: Vec<usize>,
}

impl<F: Float> NearestNeighbors<F> for LinearNearestNeighbors<F> {
    fn new() -> Self {
        Self {
            states: Vec::new(),
            items: Vec::new(),
        }
    }

    fn add(&mut self, state: &Configuration<F>, item: usize) -> Result<()> {
        if let Some(first) = self.states.first() {
            first.check_dimension(state)?;
        }
        self.states.push(state.clone());
        self.items.push(item);
        Ok(())
    }

    fn nearest_one(&self, state: &Configuration<F>) -> Result<usize> {
        let position = nearest(state, &self.states)?;
        Ok(self.items[position])
    }

    fn len(&self) -> usize {
        self.states.len()
    }
}

/// A nearest neighbor data structure backed by a k-d tree.
///
/// The dimensionality `K` is fixed at compile time; configurations of another
/// width are rejected with `DimensionMismatch`. Equidistant nodes may resolve
/// to any of their indices.
pub struct KdTreeNearestNeighbors<F: Float + Axis, const K: usize> {
    kdtree: KdTree<F, usize, K, 32, u32>,
    len: usize,
}

impl<F: Float + Axis, const K: usize> KdTreeNearestNeighbors<F, K> {
    fn point(state: &Configuration<F>) -> Result<[F; K]> {
        <[F; K]>::try_from(state.values()).map_err(|_| RrtError::DimensionMismatch {
            expected: K,
            found: state.dimension(),
        })
    }
}

impl<F: Float + Axis, const K: usize> NearestNeighbors<F> for KdTreeNearestNeighbors<F, K> {
    fn new() -> Self {
        Self {
            kdtree: KdTree::new(),
            len: 0,
        }
    }

    fn add(&mut self, state: &Configuration<F>, item: usize) -> Result<()> {
        let point = Self::point(state)?;
        self.kdtree.add(&point, item);
        self.len += 1;
        Ok(())
    }

    fn nearest_one(&self, state: &Configuration<F>) -> Result<usize> {
        if self.len == 0 {
            return Err(RrtError::EmptyTree);
        }
        let point = Self::point(state)?;
        let neighbor = self.kdtree.nearest_one::<SquaredEuclidean>(&point);
        Ok(neighbor.item)
    }

    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn line(n: usize) -> Vec<Configuration<f64>> {
        (0..n).map(|i| Configuration::from([i as f64 * 0.1])).collect()
    }

    #[test]
    fn test_nearest_on_a_line() {
        let nodes = line(10);
        assert_eq!(nearest(&Configuration::from([1.1]), &nodes).unwrap(), 9);

        let index = nearest(&Configuration::from([0.11]), &nodes).unwrap();
        assert_eq!(index, 1);
        assert!(nodes[index].distance(&Configuration::from([0.11])).unwrap() <= 0.1);
    }

    #[test]
    fn test_nearest_ties_resolve_to_lowest_index() {
        let nodes = vec![
            Configuration::from([1.0, 0.0]),
            Configuration::from([-1.0, 0.0]),
            Configuration::from([0.0, 1.0]),
        ];
        assert_eq!(nearest(&Configuration::from([0.0, 0.0]), &nodes).unwrap(), 0);
        let duplicates = vec![Configuration::from([0.5]), Configuration::from([0.5])];
        assert_eq!(nearest(&Configuration::from([0.5]), &duplicates).unwrap(), 0);
    }

    #[test]
    fn test_nearest_exact_match_has_zero_distance() {
        let nodes = vec![Configuration::from([0.0]), Configuration::from([1.0])];
        let query = Configuration::from([1.0]);
        let index = nearest(&query, &nodes).unwrap();
        assert_eq!(index, 1);
        assert_abs_diff_eq!(nodes[index].distance(&query).unwrap(), 0.0);
    }

    #[test]
    fn test_nearest_errors() {
        let empty: Vec<Configuration<f64>> = Vec::new();
        assert_eq!(
            nearest(&Configuration::from([0.0]), &empty),
            Err(RrtError::EmptyTree)
        );
        assert!(matches!(
            nearest(&Configuration::from([0.0, 0.0]), &line(3)),
            Err(RrtError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_linear_nearest_neighbors_maps_items() {
        let mut nn = LinearNearestNeighbors::<f64>::new();
        assert_eq!(
            nn.nearest_one(&Configuration::from([0.0])),
            Err(RrtError::EmptyTree)
        );
        for (i, state) in line(10).iter().enumerate() {
            nn.add(state, 100 + i).unwrap();
        }
        assert_eq!(nn.len(), 10);
        assert_eq!(nn.nearest_one(&Configuration::from([0.42])).unwrap(), 104);
        assert!(nn.add(&Configuration::from([0.0, 0.0]), 0).is_err());
    }

    #[test]
    fn test_kdtree_agrees_with_linear_scan() {
        let mut kd = KdTreeNearestNeighbors::<f64, 2>::new();
        let nodes: Vec<Configuration<f64>> = (0..50)
            .map(|i| {
                let x = (i % 7) as f64 * 1.3;
                let y = (i / 7) as f64 * 0.7 + 0.01 * i as f64;
                Configuration::from([x, y])
            })
            .collect();
        for (i, node) in nodes.iter().enumerate() {
            kd.add(node, i).unwrap();
        }
        for query in [[0.3, 0.2], [5.0, 3.3], [-1.0, 10.0], [7.9, 0.0]] {
            let query = Configuration::from(query);
            let kd_index = kd.nearest_one(&query).unwrap();
            let linear_index = nearest(&query, &nodes).unwrap();
            assert_abs_diff_eq!(
                nodes[kd_index].distance(&query).unwrap(),
                nodes[linear_index].distance(&query).unwrap()
            );
        }
    }

    #[test]
    fn test_kdtree_rejects_wrong_dimension() {
        let mut kd = KdTreeNearestNeighbors::<f64, 3>::new();
        assert_eq!(
            kd.nearest_one(&Configuration::from([0.0, 0.0, 0.0])),
            Err(RrtError::EmptyTree)
        );
        assert_eq!(
            kd.add(&Configuration::from([1.0, 2.0]), 0),
            Err(RrtError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
    }
}
