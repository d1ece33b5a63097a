// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Damasen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Damasen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::Pos;

/// Minimum spanning tree over the complete graph of `points`.
///
/// Kruskal with union-find; edge weights are squared Euclidean distances
/// (monotonic in distance, so the tree is the same and stays integral).
/// Returns the selected edges as point pairs. With fewer than two points
/// there is nothing to connect and the result is empty.
pub fn minimum_spanning_tree(points: &[Pos]) -> Vec<(Pos, Pos)> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut edges = Vec::with_capacity(points.len() * (points.len() - 1) / 2);
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            edges.push((points[i].squared_distance(points[j]), i, j));
        }
    }
    edges.sort_unstable();

    let mut parent = (0..points.len()).collect::<Vec<_>>();

    fn find(parent: &mut [usize], mut node: usize) -> usize {
        while parent[node] != node {
            parent[node] = parent[parent[node]];
            node = parent[node];
        }
        node
    }

    let mut tree = Vec::with_capacity(points.len() - 1);
    for (_, i, j) in edges {
        let root_i = find(&mut parent, i);
        let root_j = find(&mut parent, j);
        if root_i != root_j {
            parent[root_i] = root_j;
            tree.push((points[i], points[j]));
            if tree.len() == points.len() - 1 {
                break;
            }
        }
    }

    tree
}

#[cfg(test)]
mod tests {
    use crate::model::Pos;

    use super::minimum_spanning_tree;

    #[test]
    fn fewer_than_two_points_yield_no_edges() {
        assert!(minimum_spanning_tree(&[]).is_empty());
        assert!(minimum_spanning_tree(&[Pos::new(3, 3)]).is_empty());
    }

    #[test]
    fn three_points_yield_two_closest_edges() {
        let points = [Pos::new(0, 0), Pos::new(2, 0), Pos::new(10, 0)];
        let tree = minimum_spanning_tree(&points);
        assert_eq!(tree.len(), 2);
        assert!(tree.contains(&(Pos::new(0, 0), Pos::new(2, 0))));
        assert!(tree.contains(&(Pos::new(2, 0), Pos::new(10, 0))));
    }

    #[test]
    fn tree_connects_every_point() {
        let points = [
            Pos::new(1, 1),
            Pos::new(8, 2),
            Pos::new(4, 9),
            Pos::new(12, 12),
            Pos::new(2, 14),
        ];
        let tree = minimum_spanning_tree(&points);
        assert_eq!(tree.len(), points.len() - 1);

        // Union-find over the returned edges reaches a single component.
        let index_of =
            |pos: Pos| points.iter().position(|p| *p == pos).expect("known point");
        let mut parent = (0..points.len()).collect::<Vec<_>>();
        fn find(parent: &mut [usize], mut node: usize) -> usize {
            while parent[node] != node {
                node = parent[node];
            }
            node
        }
        for (a, b) in &tree {
            let ra = find(&mut parent, index_of(*a));
            let rb = find(&mut parent, index_of(*b));
            parent[ra] = rb;
        }
        let root = find(&mut parent, 0);
        for idx in 1..points.len() {
            assert_eq!(find(&mut parent, idx), root);
        }
    }
}
