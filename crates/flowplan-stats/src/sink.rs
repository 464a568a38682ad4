//! Where flushed stats go.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use flowplan_core::node::NodeId;

use crate::error::{Error, Result};
use crate::node::NodeRecord;
use crate::slice::FlowSliceStats;

/// Receives node snapshots from recorders. Called from many worker threads.
pub trait StatsSink: Send + Sync {
    fn record_node(&self, record: &NodeRecord) -> Result<()>;

    fn record_slice(&self, node: NodeId, slice: &FlowSliceStats) -> Result<()> {
        let _ = (node, slice);
        Ok(())
    }
}

/// Keeps every record in memory. Handy for tests and the CLI.
#[derive(Debug, Default)]
pub struct MemorySink {
    nodes: Mutex<Vec<NodeRecord>>,
    slices: Mutex<Vec<(NodeId, FlowSliceStats)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<NodeRecord> {
        self.nodes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<NodeRecord> {
        self.nodes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn slices(&self) -> Vec<(NodeId, FlowSliceStats)> {
        self.slices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl StatsSink for MemorySink {
    fn record_node(&self, record: &NodeRecord) -> Result<()> {
        self.nodes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn record_slice(&self, node: NodeId, slice: &FlowSliceStats) -> Result<()> {
        self.slices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((node, slice.clone()));
        Ok(())
    }
}

/// Emits each record as a structured `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl StatsSink for TracingSink {
    fn record_node(&self, record: &NodeRecord) -> Result<()> {
        tracing::info!(
            node = %record.id,
            name = %record.name,
            ordinal = record.ordinal,
            status = %record.status,
            counters = ?record.counters,
            "node stats"
        );
        Ok(())
    }

    fn record_slice(&self, node: NodeId, slice: &FlowSliceStats) -> Result<()> {
        tracing::info!(
            %node,
            slice = %slice.id,
            status = %slice.status,
            counters = ?slice.counters,
            "slice stats"
        );
        Ok(())
    }
}

#[derive(Serialize)]
struct SliceLine<'a> {
    node: NodeId,
    slice: &'a FlowSliceStats,
}

/// Streaming NDJSON sink: one JSON object per record.
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<BufWriter<W>>,
}

impl JsonLinesSink<File> {
    pub fn to_path(path: &Path) -> Result<Self> {
        let f = File::create(path)
            .map_err(|e| Error::Sink(format!("create {}: {e}", path.display())))?;
        Ok(Self::to_writer(f))
    }
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn to_writer(writer: W) -> Self {
        Self {
            writer: Mutex::new(BufWriter::new(writer)),
        }
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .into_inner()
            .map_err(|e| Error::Sink(format!("flush: {e}")))
    }

    fn write_line<T: Serialize>(&self, value: &T) -> Result<()> {
        let line = serde_json::to_string(value).map_err(|e| Error::Sink(format!("encode: {e}")))?;
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{}", line).map_err(|e| Error::Sink(format!("write: {e}")))?;
        writer
            .flush()
            .map_err(|e| Error::Sink(format!("flush: {e}")))
    }
}

impl<W: Write + Send> StatsSink for JsonLinesSink<W> {
    fn record_node(&self, record: &NodeRecord) -> Result<()> {
        self.write_line(record)
    }

    fn record_slice(&self, node: NodeId, slice: &FlowSliceStats) -> Result<()> {
        self.write_line(&SliceLine { node, slice })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Counters;
    use crate::status::StatsStatus;

    #[test]
    fn json_lines_are_one_record_each() {
        let sink = JsonLinesSink::to_writer(Vec::new());
        let mut counters = Counters::new();
        counters
            .entry("tuples".into())
            .or_default()
            .insert("read".into(), 4);
        let record = NodeRecord {
            id: NodeId::random(),
            name: "map".into(),
            ordinal: 1,
            status: StatsStatus::Running,
            counters,
        };
        sink.record_node(&record).unwrap();
        sink.record_slice(record.id, &FlowSliceStats::new("s0", StatsStatus::Running))
            .unwrap();

        let bytes = sink.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let back: NodeRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(back, record);
        assert!(lines[1].contains("\"slice\""));
        assert!(lines[1].contains("\"RUNNING\""));
    }

    #[test]
    fn file_sink_and_tracing_sink_accept_records() {
        let path = std::env::temp_dir().join(format!("flowplan-stats-{}.jsonl", NodeId::random()));
        let record = NodeRecord {
            id: NodeId::random(),
            name: "sink".into(),
            ordinal: 0,
            status: StatsStatus::Pending,
            counters: Counters::new(),
        };

        let file_sink = JsonLinesSink::to_path(&path).unwrap();
        file_sink.record_node(&record).unwrap();
        drop(file_sink);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
        let _ = std::fs::remove_file(&path);

        assert!(TracingSink.record_node(&record).is_ok());
        assert!(TracingSink
            .record_slice(record.id, &FlowSliceStats::new("s", StatsStatus::Pending))
            .is_ok());
    }
}
