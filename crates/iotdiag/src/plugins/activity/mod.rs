//! Activity diagram of the IoT system
//!
//! One pass through the system, from the ESP8266 reading its sensors to the
//! LEDs switching in response to a user command:
//!
//! ```text
//! (Start) -> read -> send -> store -> display -> control -> send_cmd -> act -> ((End))
//! ```

use crate::core::{Diagram, Digraph, Direction, GraphAttributes, NodeShape, Result};

/// Graph name written into the DOT source
pub const GRAPH_NAME: &str = "IoT_Activity";

/// Steps in execution order: id, label, shape
pub const STEPS: [(&str, &str, NodeShape); 9] = [
    ("start", "Start", NodeShape::Circle),
    ("read", "ESP8266 đọc dữ liệu cảm biến", NodeShape::Box),
    ("send", "Gửi dữ liệu qua WiFi", NodeShape::Box),
    ("store", "Lưu dữ liệu vào Database", NodeShape::Box),
    ("display", "Web Server hiển thị dữ liệu", NodeShape::Box),
    ("control", "Người dùng gửi lệnh điều khiển LED", NodeShape::Box),
    ("send_cmd", "Web Server gửi lệnh cho ESP8266", NodeShape::Box),
    ("act", "ESP8266 bật/tắt LED", NodeShape::Box),
    ("end", "End", NodeShape::DoubleCircle),
];

/// The activity diagram
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityDiagram;

impl ActivityDiagram {
    pub fn new() -> Self {
        Self
    }
}

impl Diagram for ActivityDiagram {
    fn name(&self) -> &'static str {
        "activity"
    }

    fn summary(&self) -> &'static str {
        "Activity flow: sensor reading, storage, display and LED control"
    }

    fn default_stem(&self) -> &'static str {
        "iot_activity_diagram"
    }

    fn build(&self) -> Result<Digraph> {
        let mut graph = Digraph::with_attributes(
            GRAPH_NAME,
            GraphAttributes {
                direction: Direction::TopBottom,
                size: Some("8".to_string()),
            },
        );

        for (id, label, shape) in STEPS {
            graph.node(id, label, shape)?;
        }
        // Each step flows into the next.
        for pair in STEPS.windows(2) {
            graph.edge(pair[0].0, pair[1].0)?;
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Database;

    #[test]
    fn test_shape_and_size() {
        let graph = ActivityDiagram::new().build().unwrap();
        assert_eq!(graph.name(), "IoT_Activity");
        assert_eq!(graph.node_count(), 9);
        assert_eq!(graph.edge_count(), 8);
        assert_eq!(graph.direction(), Direction::TopBottom);
        assert_eq!(graph.attributes().size.as_deref(), Some("8"));
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_edges_form_a_path_from_start_to_end() {
        let graph = ActivityDiagram::new().build().unwrap();
        let edges: Vec<(&str, &str)> = graph
            .edges()
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();
        assert_eq!(edges.first(), Some(&("start", "read")));
        assert_eq!(edges.last(), Some(&("act", "end")));
        for pair in edges.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        assert!(graph.edges().all(|e| e.label.is_none()));
    }

    #[test]
    fn test_terminal_shapes() {
        let graph = ActivityDiagram::new().build().unwrap();
        assert_eq!(graph.get_node("start").unwrap().shape, NodeShape::Circle);
        assert_eq!(graph.get_node("end").unwrap().shape, NodeShape::DoubleCircle);
        assert_eq!(graph.get_node("act").unwrap().shape, NodeShape::Box);
    }
}
