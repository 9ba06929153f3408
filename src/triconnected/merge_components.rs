use hashbrown::HashMap;

use crate::triconnected::outside_structures::{Component, ComponentType};

/// Merges P components (resp. S components) that share a virtual edge into
/// a single P (resp. S) component, the final step turning "split
/// components" into genuine triconnected components — R components are
/// never merged, and a virtual edge shared between two differently-typed
/// components stays a real split boundary.
pub(crate) fn merge_components(m: usize, split_components: &mut Vec<Component>) {
    let mut edge_to_component: Vec<Vec<usize>> = vec![Vec::new(); m];
    for (i, c) in split_components.iter().enumerate() {
        for &eid in &c.edges {
            edge_to_component[eid].push(i);
        }
    }

    let mut merged_already = vec![false; split_components.len()];
    let mut result = Vec::with_capacity(split_components.len());

    for i in 0..split_components.len() {
        if merged_already[i] {
            continue;
        }
        if split_components[i].comp_type == ComponentType::R {
            merged_already[i] = true;
            result.push(split_components[i].clone());
            continue;
        }

        let my_type = split_components[i].comp_type;
        let mut stack = vec![i];
        let mut group = vec![i];
        merged_already[i] = true;

        while let Some(cur) = stack.pop() {
            for &eid in &split_components[cur].edges {
                let occ = &edge_to_component[eid];
                if occ.len() != 2 {
                    continue;
                }
                let other = if occ[0] == cur { occ[1] } else { occ[0] };
                if !merged_already[other] && split_components[other].comp_type == my_type {
                    merged_already[other] = true;
                    stack.push(other);
                    group.push(other);
                }
            }
        }

        let mut edge_count: HashMap<usize, usize> = HashMap::new();
        for &c in &group {
            for &eid in &split_components[c].edges {
                *edge_count.entry(eid).or_insert(0) += 1;
            }
        }

        let mut merged = Component::new(my_type);
        for (eid, count) in edge_count {
            if count == 1 {
                merged.edges.push(eid);
            }
        }
        result.push(merged);
    }

    *split_components = result;
}
