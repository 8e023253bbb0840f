use fixedbitset::FixedBitSet;

use crate::{NodeType, triconnected_blocks::outside_structures::Component};

/// Merges bonds sharing a virtual edge into one bond and polygons sharing a virtual
/// edge into one polygon. The shared virtual edges disappear.
///
/// `m` is the total number of edges, real and virtual.
pub(crate) fn merge_components(m: usize, split_components: Vec<Component>) -> Vec<Component> {
    // every edge is contained in at most two components
    let mut edge_to_components: Vec<[Option<usize>; 2]> = vec![[None, None]; m];

    for (i, component) in split_components.iter().enumerate() {
        for &eid in &component.edges {
            let slot = &mut edge_to_components[eid];
            if slot[0].is_none() {
                slot[0] = Some(i);
            } else {
                debug_assert!(slot[1].is_none());
                slot[1] = Some(i);
            }
        }
    }

    let mut merged_already = vec![false; split_components.len()];
    let mut dropped = FixedBitSet::with_capacity(m);
    let mut ret = Vec::new();

    for (i, component) in split_components.iter().enumerate() {
        if merged_already[i] {
            continue;
        }
        merged_already[i] = true;

        if component.component_type == Some(NodeType::R) {
            ret.push(component.clone());
            continue;
        }

        let mut collected_edges = component.edges.clone();

        let mut j = 0;
        while j < collected_edges.len() {
            let eid = collected_edges[j];
            j += 1;

            let [Some(a), Some(b)] = edge_to_components[eid] else {
                continue; // a real edge
            };
            let other = if merged_already[a] { b } else { a };

            if !merged_already[other]
                && split_components[other].component_type == component.component_type
            {
                merged_already[other] = true;
                dropped.insert(eid);

                collected_edges.extend(
                    split_components[other]
                        .edges
                        .iter()
                        .filter(|&&e| e != eid),
                );
            }
        }

        collected_edges.retain(|&e| !dropped.contains(e));

        ret.push(Component {
            edges: collected_edges,
            component_type: component.component_type,
        });
    }

    ret
}
