// src/redundancy/edit_distance.rs
//! Ordered tree edit distance (Zhang and Shasha), with unit insert and delete
//! costs and a caller-supplied relabel cost.

use super::tree::{CanonicalTree, TreeNode};

/// Post-order numbering (1-based) with leftmost-leaf descendants and key roots.
struct Numbered<'t, 'g> {
    nodes: Vec<&'t TreeNode<'g>>,
    lml: Vec<usize>,
    keyroots: Vec<usize>,
}

impl<'t, 'g> Numbered<'t, 'g> {
    fn new(tree: &'t CanonicalTree<'g>) -> Self {
        let post = tree.postorder();
        let n = post.len();

        let mut position = vec![0; tree.len()];
        for (k, &node) in post.iter().enumerate() {
            position[node] = k + 1;
        }

        let mut lml = vec![0; n + 1];
        for (k, &node) in post.iter().enumerate() {
            lml[k + 1] = match tree.node(node).children.first() {
                Some(&first) => lml[position[first]],
                None => k + 1,
            };
        }

        let mut highest = vec![0; n + 1];
        for k in 1..=n {
            highest[lml[k]] = k;
        }
        let keyroots = (1..=n).filter(|&k| highest[lml[k]] == k).collect();

        Self {
            nodes: post.into_iter().map(|i| tree.node(i)).collect(),
            lml,
            keyroots,
        }
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, k: usize) -> &'t TreeNode<'g> {
        self.nodes[k - 1]
    }
}

/// Minimum total cost of turning `a` into `b`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn tree_edit_distance<'g, F>(a: &CanonicalTree<'g>, b: &CanonicalTree<'g>, replace: F) -> f64
where
    F: Fn(&TreeNode<'g>, &TreeNode<'g>) -> f64,
{
    let a = Numbered::new(a);
    let b = Numbered::new(b);
    let (n, m) = (a.len(), b.len());
    if n == 0 || m == 0 {
        return (n + m) as f64;
    }

    let mut tree_dist = vec![vec![0.0_f64; m + 1]; n + 1];
    for &i in &a.keyroots {
        for &j in &b.keyroots {
            forest_distance(&a, &b, i, j, &replace, &mut tree_dist);
        }
    }
    tree_dist[n][m]
}

fn forest_distance<'g, F>(
    a: &Numbered<'_, 'g>,
    b: &Numbered<'_, 'g>,
    i: usize,
    j: usize,
    replace: &F,
    tree_dist: &mut [Vec<f64>],
) where
    F: Fn(&TreeNode<'g>, &TreeNode<'g>) -> f64,
{
    let (li, lj) = (a.lml[i], b.lml[j]);
    let rows = i - li + 2;
    let cols = j - lj + 2;

    let mut fd = vec![vec![0.0_f64; cols]; rows];
    for x in 1..rows {
        fd[x][0] = fd[x - 1][0] + 1.0;
    }
    for y in 1..cols {
        fd[0][y] = fd[0][y - 1] + 1.0;
    }

    for x in 1..rows {
        let i1 = li + x - 1;
        for y in 1..cols {
            let j1 = lj + y - 1;
            let delete = fd[x - 1][y] + 1.0;
            let insert = fd[x][y - 1] + 1.0;
            if a.lml[i1] == li && b.lml[j1] == lj {
                let relabel = fd[x - 1][y - 1] + replace(a.node(i1), b.node(j1));
                fd[x][y] = delete.min(insert).min(relabel);
                tree_dist[i1][j1] = fd[x][y];
            } else {
                let p = a.lml[i1] - li;
                let q = b.lml[j1] - lj;
                let subtree = fd[p][q] + tree_dist[i1][j1];
                fd[x][y] = delete.min(insert).min(subtree);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::graph::{Subgraph, Vertex, WeightedGraph};
    use std::collections::BTreeSet;

    fn unit(x: &TreeNode<'_>, y: &TreeNode<'_>) -> f64 {
        if x.meaning == y.meaning && x.role == y.role {
            0.0
        } else {
            1.0
        }
    }

    fn chain(meanings: &[&str]) -> Result<WeightedGraph> {
        let mut g = WeightedGraph::new();
        for (i, m) in meanings.iter().enumerate() {
            g.add_vertex(Vertex::new(format!("v{i}"), *m))?;
        }
        for i in 1..meanings.len() {
            g.add_edge(&format!("v{}", i - 1), &format!("v{i}"), "ARG0")?;
        }
        Ok(g)
    }

    fn whole(g: &WeightedGraph) -> Subgraph<'_> {
        Subgraph::new(g, (0..g.vertex_count()).collect::<BTreeSet<_>>(), 0, None, 0.0)
    }

    #[test]
    fn identical_trees_cost_nothing() -> Result<()> {
        let g = chain(&["a", "b", "c"])?;
        let t = CanonicalTree::from_subgraph(&whole(&g));
        assert_eq!(tree_edit_distance(&t, &t, unit), 0.0);
        Ok(())
    }

    #[test]
    fn one_relabel_or_one_insertion() -> Result<()> {
        let g1 = chain(&["a", "b", "c"])?;
        let g2 = chain(&["a", "x", "c"])?;
        let g3 = chain(&["a", "b"])?;
        let t1 = CanonicalTree::from_subgraph(&whole(&g1));
        let t2 = CanonicalTree::from_subgraph(&whole(&g2));
        let t3 = CanonicalTree::from_subgraph(&whole(&g3));
        assert_eq!(tree_edit_distance(&t1, &t2, unit), 1.0);
        assert_eq!(tree_edit_distance(&t1, &t3, unit), 1.0);
        assert_eq!(tree_edit_distance(&t3, &t1, unit), 1.0);
        Ok(())
    }

    #[test]
    fn empty_tree_costs_every_node() -> Result<()> {
        let g = chain(&["a", "b", "c"])?;
        let t = CanonicalTree::from_subgraph(&whole(&g));
        let empty = CanonicalTree::default();
        assert_eq!(tree_edit_distance(&t, &empty, unit), 3.0);
        Ok(())
    }
}
