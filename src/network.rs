// A road network read from a SUMO-style .net.xml file.  Routes in such networks run from edge to
// edge, so the routing graph has one node per network edge and one arc per turn connection.
use std::collections::HashMap;
use std::io::{BufReader, Read};
use std::path::Path;

use petgraph::algo::{dijkstra, kosaraju_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use xml::reader::{EventReader, XmlEvent};

use super::access::AccessRole;
use super::config_utils;
use super::error::{OdError, Result};
use super::oracle::CostOracle;

// SUMO's default lane speed, in m/s.
const DEFAULT_SPEED_MPS: f64 = 13.89;


#[derive(PartialEq, Debug, Clone)]
pub struct NetworkEdge {
    pub id: String,
    pub travel_time_s: f64,
}

impl NetworkEdge {
    pub fn new(id: &str, travel_time_s: f64) -> NetworkEdge {
        NetworkEdge {id: String::from(id), travel_time_s}
    }
}

pub struct RoadNetwork {
    // in the order they were given
    edge_ids: Vec<String>,
    edge_idxs_by_id: HashMap<String, NodeIndex>,
    graph: DiGraph<NetworkEdge, ()>,
}

impl RoadNetwork {
    pub fn from_xml(xml_path: &Path) -> Result<RoadNetwork> {
        let parser = config_utils::xml_parser_from_path(xml_path)?;
        let network = RoadNetwork::from_parser(parser)?;
        log::info!("read {} edges from {}", network.edge_ids.len(), xml_path.display());
        Ok(network)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<RoadNetwork> {
        RoadNetwork::from_parser(EventReader::new(BufReader::new(reader)))
    }

    fn from_parser<R: Read>(parser: EventReader<R>) -> Result<RoadNetwork> {
        let mut edges = vec![];
        let mut connections = vec![];
        // the edge whose lanes we're currently reading, and its fastest lane time so far
        let mut cur_edge: Option<(String, Option<f64>)> = None;

        for event in parser {
            match event? {
                XmlEvent::StartElement{ name, attributes, .. } => {
                    match name.local_name.as_str() {
                        "edge" => {
                            let id = required_attribute(&attributes, "edge", "id")?;
                            let function = config_utils::get_xml_attribute_value(&attributes,
                                                                                 "function");
                            let internal = id.starts_with(':') ||
                                           function.map_or(false, |ff| ff == "internal");
                            if !internal {
                                cur_edge = Some((id, None));
                            }
                        }
                        "lane" => {
                            if let Some((edge_id, fastest)) = &mut cur_edge {
                                let length: f64 = config_utils::parse_xml_attribute(
                                    &attributes, "length")?.ok_or_else(|| {
                                        OdError::Config(format!(
                                            "a lane of edge {:?} has no \"length\" attribute",
                                            edge_id))
                                    })?;
                                let speed: f64 = config_utils::parse_xml_attribute(
                                    &attributes, "speed")?.unwrap_or(DEFAULT_SPEED_MPS);
                                let time = length / speed;
                                *fastest = Some(fastest.map_or(time, |ff| ff.min(time)));
                            }
                        }
                        "connection" => {
                            let from = required_attribute(&attributes, "connection", "from")?;
                            let to = required_attribute(&attributes, "connection", "to")?;
                            connections.push((from, to));
                        }
                        _ => (),
                    }
                }
                XmlEvent::EndElement{ name } if name.local_name == "edge" => {
                    if let Some((id, fastest)) = cur_edge.take() {
                        if fastest.is_none() {
                            log::warn!("edge {} has no lanes; treating it as free to cross", id);
                        }
                        edges.push(NetworkEdge {id, travel_time_s: fastest.unwrap_or(0.)});
                    }
                }
                XmlEvent::EndDocument => break,
                _ => (),
            }
        }

        Ok(RoadNetwork::from_edges(edges, &connections))
    }

    /// Builds a network from routable edges and the (from, to) connections between them.
    /// Connections naming an edge that isn't in `edges` are ignored.
    pub fn from_edges(edges: Vec<NetworkEdge>, connections: &[(String, String)]) -> RoadNetwork {
        let mut graph = DiGraph::new();
        let mut edge_idxs_by_id = HashMap::new();
        let edge_ids = edges.iter().map(|edge| edge.id.clone()).collect();
        for edge in edges {
            let id = edge.id.clone();
            let idx = graph.add_node(edge);
            edge_idxs_by_id.insert(id, idx);
        }

        for (from_id, to_id) in connections {
            match (edge_idxs_by_id.get(from_id), edge_idxs_by_id.get(to_id)) {
                (Some(from_idx), Some(to_idx)) => {
                    if graph.find_edge(*from_idx, *to_idx).is_none() {
                        graph.add_edge(*from_idx, *to_idx, ());
                    }
                }
                _ => log::debug!("skipping connection {} -> {}", from_id, to_id),
            }
        }

        let comps = kosaraju_scc(&graph);
        if comps.len() > 1 {
            log::warn!("network has {} strongly connected components; some pairs may have \
                        no route", comps.len());
        }

        RoadNetwork {edge_ids, edge_idxs_by_id, graph}
    }

    /// Returns the ids of the edges tagged as origins and as destinations, in network order.
    /// Junction-internal edges are never contours.
    pub fn contours(&self) -> Result<(Vec<String>, Vec<String>)> {
        let mut origins = vec![];
        let mut destinations = vec![];
        for id in &self.edge_ids {
            match AccessRole::from_id(id)? {
                Some(AccessRole::Origin) => origins.push(id.clone()),
                Some(AccessRole::Destination) => destinations.push(id.clone()),
                None => (),
            }
        }
        log::info!("found {} origin and {} destination edges", origins.len(),
                   destinations.len());
        Ok((origins, destinations))
    }

    pub fn oracle(&self) -> NetworkOracle {
        NetworkOracle {network: self, times_by_origin: HashMap::new()}
    }

    pub fn get_edge(&self, id: &str) -> Option<&NetworkEdge> {
        self.edge_idxs_by_id.get(id).map(|idx| &self.graph[*idx])
    }

    pub fn num_edges(&self) -> usize {
        self.graph.node_count()
    }

    pub fn num_connections(&self) -> usize {
        self.graph.edge_count()
    }
}

fn required_attribute(attributes: &[xml::attribute::OwnedAttribute], element: &str,
                      attr_name: &str) -> Result<String> {
    config_utils::get_xml_attribute_value(attributes, attr_name).ok_or_else(|| {
        OdError::Config(format!("<{}> element has no {:?} attribute", element, attr_name))
    })
}


/// Prices routes on a `RoadNetwork` by the total travel time of the edges they use, both end
/// edges included.  Shortest-path trees are cached per origin while the oracle is open.
pub struct NetworkOracle<'a> {
    network: &'a RoadNetwork,
    times_by_origin: HashMap<NodeIndex, HashMap<NodeIndex, f64>>,
}

impl<'a> NetworkOracle<'a> {
    fn edge_idx(&self, id: &str) -> Result<NodeIndex> {
        self.network.edge_idxs_by_id.get(id)
                                    .cloned()
                                    .ok_or_else(|| OdError::UnknownPoint(String::from(id)))
    }
}

impl<'a> CostOracle for NetworkOracle<'a> {
    fn find_route(&mut self, from: &str, to: &str) -> Result<Option<f64>> {
        let from_idx = self.edge_idx(from)?;
        let to_idx = self.edge_idx(to)?;
        let graph = &self.network.graph;
        let times = self.times_by_origin.entry(from_idx).or_insert_with(|| {
            // arcs cost the time to cross the edge they lead onto
            dijkstra(graph, from_idx, None, |er| graph[er.target()].travel_time_s)
        });
        Ok(times.get(&to_idx).map(|time| time + graph[from_idx].travel_time_s))
    }

    fn close(&mut self) {
        log::debug!("dropping {} cached shortest-path trees", self.times_by_origin.len());
        self.times_by_origin.clear();
    }
}
