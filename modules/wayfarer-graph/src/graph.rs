//! Screen graph construction from raw exported screens and links.
//!
//! Link endpoints arrive as opaque string identifiers and are resolved to
//! integer screen ids before construction: exact numeric parse first, then a
//! caller-supplied alias map. Links that cannot be resolved are dropped with
//! a warning — partially-annotated exports are common and must never abort a
//! run.

use std::collections::HashMap;

use tracing::warn;

use wayfarer_common::{EdgeKind, NavigationEdge, RawLink, RawScreen, ScreenNode, WayfarerError};

const NO_EDGES: &[NavigationEdge] = &[];

/// Immutable screen graph: nodes by id, outgoing edges by source id.
/// Built once per run and shared read-only across all sessions.
#[derive(Debug, Clone, Default)]
pub struct ScreenGraph {
    nodes: HashMap<i64, ScreenNode>,
    outgoing: HashMap<i64, Vec<NavigationEdge>>,
    edge_count: usize,
    dropped_links: usize,
}

impl ScreenGraph {
    /// Build a graph from raw exports. Unresolvable links are dropped with a
    /// warning, never fatal.
    pub fn build(
        screens: Vec<RawScreen>,
        links: Vec<RawLink>,
        aliases: &HashMap<String, i64>,
    ) -> Self {
        let nodes: HashMap<i64, ScreenNode> = screens
            .into_iter()
            .map(|s| {
                (
                    s.id,
                    ScreenNode {
                        id: s.id,
                        name: s.name,
                        description: s.description,
                        file: s.file,
                    },
                )
            })
            .collect();

        let mut outgoing: HashMap<i64, Vec<NavigationEdge>> = HashMap::new();
        let mut edge_count = 0;
        let mut dropped_links = 0;

        for link in links {
            let source = resolve_screen_id(&link.source_screen_id, &nodes, aliases);
            let dest = resolve_screen_id(&link.destination_screen_id, &nodes, aliases);
            let (source, dest) = match (source, dest) {
                (Some(s), Some(d)) => (s, d),
                _ => {
                    warn!(
                        source = link.source_screen_id.as_str(),
                        dest = link.destination_screen_id.as_str(),
                        link_id = link.link_id,
                        "Dropping link with unresolvable endpoint"
                    );
                    dropped_links += 1;
                    continue;
                }
            };

            let frame_wide = link.is_click_anywhere.unwrap_or(false);
            outgoing.entry(source).or_default().push(NavigationEdge {
                source,
                dest,
                link_id: link.link_id,
                click_target: link.click_target,
                user_intent: link.user_intent,
                frame_wide,
                auto_advance: link.is_auto_delay.unwrap_or(false),
                kind: if frame_wide {
                    EdgeKind::Frame
                } else {
                    EdgeKind::Element
                },
            });
            edge_count += 1;
        }

        // link_id is the stable sort key: adjacency order must not depend on
        // input file order.
        for edges in outgoing.values_mut() {
            edges.sort_by_key(|e| e.link_id);
        }

        Self {
            nodes,
            outgoing,
            edge_count,
            dropped_links,
        }
    }

    pub fn node(&self, id: i64) -> Option<&ScreenNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Outgoing edges from a screen, sorted by `link_id`. Empty for unknown
    /// screens and dead ends alike.
    pub fn outgoing(&self, id: i64) -> &[NavigationEdge] {
        self.outgoing.get(&id).map_or(NO_EDGES, Vec::as_slice)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.nodes.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Links discarded during construction because an endpoint never resolved.
    pub fn dropped_links(&self) -> usize {
        self.dropped_links
    }

    /// Strict check for callers that treat dropped links as fatal rather
    /// than tolerable.
    pub fn ensure_complete(&self) -> Result<(), WayfarerError> {
        if self.dropped_links > 0 {
            return Err(WayfarerError::MalformedGraph(format!(
                "{} links reference unknown screens",
                self.dropped_links
            )));
        }
        Ok(())
    }
}

fn resolve_screen_id(
    raw: &str,
    nodes: &HashMap<i64, ScreenNode>,
    aliases: &HashMap<String, i64>,
) -> Option<i64> {
    if let Ok(id) = raw.trim().parse::<i64>() {
        if nodes.contains_key(&id) {
            return Some(id);
        }
    }
    aliases.get(raw).copied().filter(|id| nodes.contains_key(id))
}
