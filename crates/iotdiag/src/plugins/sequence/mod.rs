//! Sequence diagram of the IoT system
//!
//! The six participants as boxes and the eleven messages between them as
//! labeled arrows, in the order they are exchanged: sensor data flowing up to
//! the database, a user viewing it, and an LED command travelling down to
//! the actuators and being confirmed.

use crate::core::{Diagram, Digraph, Direction, GraphAttributes, NodeShape, Result};

/// Graph name written into the DOT source
pub const GRAPH_NAME: &str = "IoT_Sequence";

/// Participants; each id doubles as its label
pub const ACTORS: [&str; 6] = [
    "User/Web Client",
    "Web Server",
    "Database",
    "ESP8266",
    "Sensors",
    "LEDs",
];

/// Messages in exchange order: from, to, label
pub const MESSAGES: [(&str, &str, &str); 11] = [
    ("Sensors", "ESP8266", "Gửi dữ liệu cảm biến (ánh sáng, nhiệt độ, độ ẩm)"),
    ("ESP8266", "Web Server", "HTTP/MQTT gửi dữ liệu"),
    ("Web Server", "Database", "Lưu dữ liệu cảm biến"),
    ("User/Web Client", "Web Server", "Yêu cầu hiển thị dữ liệu"),
    ("Web Server", "Database", "Truy vấn dữ liệu cảm biến"),
    ("Web Server", "User/Web Client", "Trả về dữ liệu + giao diện"),
    ("User/Web Client", "Web Server", "Gửi lệnh điều khiển LED"),
    ("Web Server", "ESP8266", "Gửi lệnh bật/tắt LED"),
    ("ESP8266", "LEDs", "Thay đổi trạng thái LED"),
    ("ESP8266", "Web Server", "Xác nhận trạng thái LED"),
    ("Web Server", "User/Web Client", "Cập nhật trạng thái LED trên web"),
];

/// The sequence diagram
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceDiagram;

impl SequenceDiagram {
    pub fn new() -> Self {
        Self
    }
}

impl Diagram for SequenceDiagram {
    fn name(&self) -> &'static str {
        "sequence"
    }

    fn summary(&self) -> &'static str {
        "Messages between web client, server, database, ESP8266, sensors and LEDs"
    }

    fn default_stem(&self) -> &'static str {
        "iot_sequence_diagram"
    }

    fn build(&self) -> Result<Digraph> {
        let mut graph = Digraph::with_attributes(
            GRAPH_NAME,
            GraphAttributes {
                direction: Direction::TopBottom,
                size: Some("8".to_string()),
            },
        );

        for actor in ACTORS {
            graph.node(actor, actor, NodeShape::Rect)?;
        }
        for (from, to, label) in MESSAGES {
            graph.labeled_edge(from, to, label)?;
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Database;

    #[test]
    fn test_participants_and_messages() {
        let graph = SequenceDiagram::new().build().unwrap();
        assert_eq!(graph.name(), "IoT_Sequence");
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 11);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_actor_ids_are_labels() {
        let graph = SequenceDiagram::new().build().unwrap();
        for node in graph.nodes() {
            assert_eq!(node.id, node.label);
            assert_eq!(node.shape, NodeShape::Rect);
        }
    }

    #[test]
    fn test_every_message_is_labeled_in_order() {
        let graph = SequenceDiagram::new().build().unwrap();
        let labels: Vec<&str> = graph
            .edges()
            .filter_map(|e| e.label.as_deref())
            .collect();
        let expected: Vec<&str> = MESSAGES.iter().map(|(_, _, label)| *label).collect();
        assert_eq!(labels, expected);
    }
}
