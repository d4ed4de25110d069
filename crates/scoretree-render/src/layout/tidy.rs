//! Buchheim, Jünger & Leipert, "Improving Walker's Algorithm to Run in Linear Time" (2002), in
//! the formulation used by d3-hierarchy's `tree()`.
//!
//! The first walk (post-order) assigns preliminary positions `z` and modifiers `m`, merging
//! subtree contours through threads. The second walk (pre-order) accumulates modifiers into
//! final positions.

use super::FlatTree;

struct Walker {
    /// `parent[v]` for real nodes; the virtual root `n` is the parent of the real root.
    parent: Vec<usize>,
    children: Vec<Vec<usize>>,
    /// Index among siblings.
    number: Vec<usize>,
    z: Vec<f64>,
    m: Vec<f64>,
    shift: Vec<f64>,
    change: Vec<f64>,
    thread: Vec<Option<usize>>,
    ancestor: Vec<usize>,
    default_ancestor: Vec<Option<usize>>,
}

impl Walker {
    fn new(flat: &FlatTree<'_>) -> Self {
        let n = flat.len();
        let mut parent = vec![n; n + 1];
        let mut children = vec![Vec::new(); n + 1];
        let mut number = vec![0; n + 1];
        for (index, node) in flat.nodes.iter().enumerate() {
            if let Some(p) = node.parent {
                parent[index] = p;
            }
            children[index] = node.children.clone();
            for (i, &c) in node.children.iter().enumerate() {
                number[c] = i;
            }
        }
        children[n] = vec![0];

        Self {
            parent,
            children,
            number,
            z: vec![0.0; n + 1],
            m: vec![0.0; n + 1],
            shift: vec![0.0; n + 1],
            change: vec![0.0; n + 1],
            thread: vec![None; n + 1],
            ancestor: (0..=n).collect(),
            default_ancestor: vec![None; n + 1],
        }
    }

    fn separation(&self, a: usize, b: usize) -> f64 {
        if self.parent[a] == self.parent[b] {
            1.0
        } else {
            2.0
        }
    }

    fn next_left(&self, v: usize) -> Option<usize> {
        self.children[v].first().copied().or(self.thread[v])
    }

    fn next_right(&self, v: usize) -> Option<usize> {
        self.children[v].last().copied().or(self.thread[v])
    }

    fn left_sibling(&self, v: usize) -> Option<usize> {
        let i = self.number[v];
        if i == 0 {
            None
        } else {
            Some(self.children[self.parent[v]][i - 1])
        }
    }

    fn first_walk(&mut self, v: usize) {
        let p = self.parent[v];
        let w = self.left_sibling(v);

        if let (Some(&first), Some(&last)) = (self.children[v].first(), self.children[v].last()) {
            self.execute_shifts(v);
            let midpoint = (self.z[first] + self.z[last]) / 2.0;
            match w {
                Some(w) => {
                    self.z[v] = self.z[w] + self.separation(v, w);
                    self.m[v] = self.z[v] - midpoint;
                }
                None => self.z[v] = midpoint,
            }
        } else if let Some(w) = w {
            self.z[v] = self.z[w] + self.separation(v, w);
        }

        let ancestor = self.default_ancestor[p].unwrap_or(self.children[p][0]);
        self.default_ancestor[p] = Some(self.apportion(v, w, ancestor));
    }

    fn apportion(&mut self, v: usize, w: Option<usize>, mut ancestor: usize) -> usize {
        let Some(w) = w else {
            return ancestor;
        };

        let mut vip = v;
        let mut vop = v;
        let mut vim = w;
        let mut vom = self.children[self.parent[v]][0];
        let mut sip = self.m[vip];
        let mut sop = self.m[vop];
        let mut sim = self.m[vim];
        let mut som = self.m[vom];

        let mut next_im = self.next_right(vim);
        let mut next_ip = self.next_left(vip);
        while let (Some(im), Some(ip)) = (next_im, next_ip) {
            vim = im;
            vip = ip;
            let (Some(om), Some(op)) = (self.next_left(vom), self.next_right(vop)) else {
                break;
            };
            vom = om;
            vop = op;
            self.ancestor[vop] = v;

            let shift = self.z[vim] + sim - self.z[vip] - sip + self.separation(vim, vip);
            if shift > 0.0 {
                let wm = self.next_ancestor(vim, v, ancestor);
                self.move_subtree(wm, v, shift);
                sip += shift;
                sop += shift;
            }
            sim += self.m[vim];
            sip += self.m[vip];
            som += self.m[vom];
            sop += self.m[vop];

            next_im = self.next_right(vim);
            next_ip = self.next_left(vip);
        }

        if next_im.is_some() && self.next_right(vop).is_none() {
            self.thread[vop] = next_im;
            self.m[vop] += sim - sop;
        }
        if next_ip.is_some() && self.next_left(vom).is_none() {
            self.thread[vom] = next_ip;
            self.m[vom] += sip - som;
            ancestor = v;
        }
        ancestor
    }

    fn next_ancestor(&self, vim: usize, v: usize, ancestor: usize) -> usize {
        let a = self.ancestor[vim];
        if self.parent[a] == self.parent[v] {
            a
        } else {
            ancestor
        }
    }

    fn move_subtree(&mut self, wm: usize, wp: usize, shift: f64) {
        let subtrees = (self.number[wp] - self.number[wm]) as f64;
        let change = shift / subtrees;
        self.change[wp] -= change;
        self.shift[wp] += shift;
        self.change[wm] += change;
        self.z[wp] += shift;
        self.m[wp] += shift;
    }

    fn execute_shifts(&mut self, v: usize) {
        let mut shift = 0.0;
        let mut change = 0.0;
        for i in (0..self.children[v].len()).rev() {
            let w = self.children[v][i];
            self.z[w] += shift;
            self.m[w] += shift;
            change += self.change[w];
            shift += self.shift[w] + change;
        }
    }
}

/// Post-order with children visited left to right.
fn post_order(flat: &FlatTree<'_>) -> Vec<usize> {
    let mut out = Vec::with_capacity(flat.len());
    let mut stack = vec![0];
    while let Some(v) = stack.pop() {
        out.push(v);
        stack.extend(flat.nodes[v].children.iter().copied());
    }
    out.reverse();
    out
}

pub(super) fn breadth_units(flat: &FlatTree<'_>) -> Vec<f64> {
    let n = flat.len();
    let mut walker = Walker::new(flat);

    for v in post_order(flat) {
        walker.first_walk(v);
    }
    walker.m[n] = -walker.z[0];

    let mut units = vec![0.0; n];
    // Pre-order: parents are finalized before their children.
    for v in 0..n {
        let p = walker.parent[v];
        units[v] = walker.z[v] + walker.m[p];
        walker.m[v] += walker.m[p];
    }
    units
}
