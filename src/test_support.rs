use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use crate::db::{ConnectionInfo, Connector, DbError, ScriptConnection};
use crate::utils::logging::{build_subscriber, default_filter};

#[derive(Debug, Default)]
pub struct CallLog {
    pub connects: usize,
    pub executed: Vec<String>,
    pub procedures: Vec<String>,
    pub commits: usize,
    pub closes: usize,
}

/// In-memory connector that records every call and fails statements whose
/// text contains a registered fragment.
#[derive(Default)]
pub struct RecordingConnector {
    pub log: Rc<RefCell<CallLog>>,
    failures: Rc<Vec<(String, DbError)>>,
    connect_error: Option<DbError>,
}

impl RecordingConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, fragment: &str, err: DbError) -> Self {
        let mut failures = (*self.failures).clone();
        failures.push((fragment.to_string(), err));
        self.failures = Rc::new(failures);
        self
    }

    pub fn refusing_connection(mut self, err: DbError) -> Self {
        self.connect_error = Some(err);
        self
    }
}

impl Connector for RecordingConnector {
    type Connection = RecordingConnection;

    fn connect(&self, _info: &ConnectionInfo) -> Result<RecordingConnection, DbError> {
        self.log.borrow_mut().connects += 1;
        if let Some(err) = &self.connect_error {
            return Err(err.clone());
        }
        Ok(RecordingConnection {
            log: Rc::clone(&self.log),
            failures: Rc::clone(&self.failures),
        })
    }
}

pub struct RecordingConnection {
    log: Rc<RefCell<CallLog>>,
    failures: Rc<Vec<(String, DbError)>>,
}

impl RecordingConnection {
    fn failure_for(&self, text: &str) -> Result<(), DbError> {
        match self
            .failures
            .iter()
            .find(|(fragment, _)| text.contains(fragment.as_str()))
        {
            Some((_, err)) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl ScriptConnection for RecordingConnection {
    fn execute(&mut self, sql: &str) -> Result<(), DbError> {
        self.log.borrow_mut().executed.push(sql.to_string());
        self.failure_for(sql)
    }

    fn call_procedure(&mut self, name: &str) -> Result<(), DbError> {
        self.log.borrow_mut().procedures.push(name.to_string());
        self.failure_for(name)
    }

    fn commit(&mut self) -> Result<(), DbError> {
        self.log.borrow_mut().commits += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), DbError> {
        self.log.borrow_mut().closes += 1;
        Ok(())
    }
}

pub fn test_connection_info() -> ConnectionInfo {
    ConnectionInfo::new("test", "RETAIL_DW", "secret", "localhost", 1521, "XEPDB1")
}

/// Shared buffer standing in for stderr under the default logging setup.
#[derive(Clone, Default)]
pub struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with the non-verbose `init_logging` subscriber installed for the
/// current thread, returning its result and everything that was logged.
pub fn with_default_logging<T>(f: impl FnOnce() -> T) -> (T, String) {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = build_subscriber(default_filter(false), move || writer.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, log.contents())
}
