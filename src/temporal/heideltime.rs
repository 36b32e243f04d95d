// WHY: HeidelTime runs in a long-lived JVM. Each request is terminated by a unique marker
// line so a reply left over from a timed-out request is never mistaken for the current one.
// A worker serves one request at a time; the pool spreads requests over several workers.
// Writes to the JVM go through a writer thread so a child that stops reading its input
// cannot hold a request past its deadline.

use chrono::NaiveDate;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, TryLockError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{DocumentType, TemporalExpression, TemporalRequest, TemporalTagger, TimexType};
use crate::error::TaggerError;

const MARKER_PREFIX: &str = "<<END-";
const BUSY_RETRY: Duration = Duration::from_millis(5);

/// `[temporal.heideltime]` settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeidelTimeConfig {
    pub jar_path: PathBuf,
    pub config_path: PathBuf,
    pub java_opts: Vec<String>,
    pub workers: usize,
}

impl Default for HeidelTimeConfig {
    fn default() -> Self {
        Self {
            jar_path: PathBuf::from("heideltime/de.unihd.dbs.heideltime.standalone.jar"),
            config_path: PathBuf::from("config.props"),
            java_opts: Vec::new(),
            workers: 2,
        }
    }
}

/// Arguments fixed for the lifetime of a JVM
#[derive(Debug, Clone)]
struct LaunchSettings {
    config: HeidelTimeConfig,
    language: String,
    document_type: DocumentType,
    reference_date: Option<NaiveDate>,
}

impl LaunchSettings {
    fn command(&self) -> Command {
        let mut command = Command::new("java");
        command
            .args(&self.config.java_opts)
            .arg("-jar")
            .arg(&self.config.jar_path)
            .arg("-c")
            .arg(&self.config.config_path)
            .args(["-l", self.language.as_str()])
            .args(["-t", self.document_type.heideltime_name()])
            .args(["-g", "full"]);
        if let Some(date) = self.reference_date {
            command.arg("-dct").arg(date.format("%Y-%m-%d").to_string());
        }
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

/// One HeidelTime JVM with background threads feeding its stdin and draining its stdout
pub struct HeidelTimeWorker {
    id: usize,
    settings: LaunchSettings,
    child: Child,
    requests: Sender<String>,
    written: Receiver<io::Result<()>>,
    lines: Receiver<String>,
    /// Cleared when the JVM stalled on input and was killed
    healthy: bool,
}

impl HeidelTimeWorker {
    pub fn spawn(
        id: usize,
        config: &HeidelTimeConfig,
        language: &str,
        document_type: DocumentType,
        reference_date: Option<NaiveDate>,
    ) -> Result<Self, TaggerError> {
        let settings = LaunchSettings {
            config: config.clone(),
            language: language.to_string(),
            document_type,
            reference_date,
        };
        Self::launch(id, settings)
    }

    fn launch(id: usize, settings: LaunchSettings) -> Result<Self, TaggerError> {
        if !settings.config.jar_path.exists() {
            return Err(TaggerError::Unavailable(format!(
                "HeidelTime jar not found at {}",
                settings.config.jar_path.display()
            )));
        }

        let mut child = settings.command().spawn()?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| TaggerError::Unavailable("HeidelTime stdin not captured".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| TaggerError::Unavailable("HeidelTime stdout not captured".into()))?;

        let (requests, written) = spawn_writer(id, stdin)?;

        let (sender, lines) = unbounded();
        thread::Builder::new()
            .name(format!("heideltime-stdout-{id}"))
            .spawn(move || {
                for line in BufReader::new(stdout).lines() {
                    let Ok(line) = line else { break };
                    if sender.send(line).is_err() {
                        break;
                    }
                }
            })?;

        if let Some(stderr) = child.stderr.take() {
            thread::Builder::new()
                .name(format!("heideltime-stderr-{id}"))
                .spawn(move || {
                    for line in BufReader::new(stderr).lines().map_while(Result::ok) {
                        debug!(worker = id, "heideltime: {}", line);
                    }
                })?;
        }

        info!("Started HeidelTime worker {} (pid {})", id, child.id());
        Ok(Self {
            id,
            settings,
            child,
            requests,
            written,
            lines,
            healthy: true,
        })
    }

    pub fn is_alive(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Restart the JVM if it has exited or was killed after stalling
    fn ensure_alive(&mut self) -> Result<(), TaggerError> {
        if self.healthy && self.is_alive() {
            return Ok(());
        }
        warn!("HeidelTime worker {} exited, restarting", self.id);
        *self = Self::launch(self.id, self.settings.clone())?;
        Ok(())
    }

    /// Send one document and collect the TimeML reply up to this request's marker
    pub fn process(&mut self, text: &str, timeout: Duration) -> Result<String, TaggerError> {
        self.ensure_alive()?;

        let deadline = Instant::now() + timeout;
        let marker = format!("{MARKER_PREFIX}{}>>", Uuid::new_v4());
        if self.requests.send(format!("{text}\n{marker}\n")).is_err() {
            self.healthy = false;
            return Err(TaggerError::Unavailable(format!(
                "HeidelTime worker {} stopped accepting input",
                self.id
            )));
        }

        if let Err(error) = await_write(&self.written, deadline, timeout) {
            warn!("HeidelTime worker {} failed to take input: {}", self.id, error);
            self.healthy = false;
            let _ = self.child.kill();
            return Err(error);
        }

        collect_reply(&self.lines, &marker, deadline, timeout)
    }
}

/// Feed `sink` from a channel on its own thread; every payload is acknowledged once flushed
fn spawn_writer<W>(
    id: usize,
    mut sink: W,
) -> Result<(Sender<String>, Receiver<io::Result<()>>), TaggerError>
where
    W: Write + Send + 'static,
{
    let (requests, inbox) = unbounded::<String>();
    let (acks, written) = unbounded();
    thread::Builder::new()
        .name(format!("heideltime-stdin-{id}"))
        .spawn(move || {
            for payload in inbox {
                let result = sink.write_all(payload.as_bytes()).and_then(|()| sink.flush());
                let failed = result.is_err();
                if acks.send(result).is_err() || failed {
                    break;
                }
            }
        })?;
    Ok((requests, written))
}

/// Wait until the writer thread has flushed the current request
fn await_write(
    written: &Receiver<io::Result<()>>,
    deadline: Instant,
    timeout: Duration,
) -> Result<(), TaggerError> {
    let remaining = deadline.saturating_duration_since(Instant::now());
    match written.recv_timeout(remaining) {
        Ok(result) => result.map_err(TaggerError::from),
        Err(RecvTimeoutError::Timeout) => Err(TaggerError::Timeout(timeout)),
        Err(RecvTimeoutError::Disconnected) => Err(TaggerError::Unavailable(
            "HeidelTime input closed".into(),
        )),
    }
}

/// Lines up to `marker`. Lines followed by another request's marker are left over from a
/// timed-out request and are dropped.
fn collect_reply(
    lines: &Receiver<String>,
    marker: &str,
    deadline: Instant,
    timeout: Duration,
) -> Result<String, TaggerError> {
    let mut reply = Vec::new();
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match lines.recv_timeout(remaining) {
            Ok(line) if line.contains(marker) => return Ok(reply.join("\n")),
            Ok(line) if line.contains(MARKER_PREFIX) => {
                debug!("Discarding stale HeidelTime reply");
                reply.clear();
            }
            Ok(line) => reply.push(line),
            Err(RecvTimeoutError::Timeout) => return Err(TaggerError::Timeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => {
                return Err(TaggerError::Unavailable(
                    "HeidelTime closed its output".into(),
                ))
            }
        }
    }
}

impl Drop for HeidelTimeWorker {
    fn drop(&mut self) {
        if self.is_alive() {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}

/// Fixed set of workers, each serving at most one request at a time
pub struct HeidelTimePool {
    workers: Vec<Mutex<HeidelTimeWorker>>,
    next: AtomicUsize,
}

impl HeidelTimePool {
    pub fn new(
        config: &HeidelTimeConfig,
        language: &str,
        document_type: DocumentType,
        reference_date: Option<NaiveDate>,
    ) -> Result<Self, TaggerError> {
        let count = config.workers.max(1);
        let workers = (0..count)
            .map(|id| {
                HeidelTimeWorker::spawn(id, config, language, document_type, reference_date)
                    .map(Mutex::new)
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!("HeidelTime pool ready with {} workers", workers.len());
        Ok(Self {
            workers,
            next: AtomicUsize::new(0),
        })
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Round-robin over idle workers until one is free or the deadline passes
    fn with_worker<T>(
        &self,
        timeout: Duration,
        task: impl FnOnce(&mut HeidelTimeWorker, Duration) -> Result<T, TaggerError>,
    ) -> Result<T, TaggerError> {
        let deadline = Instant::now() + timeout;
        loop {
            let first = self.next.fetch_add(1, Ordering::Relaxed);
            for offset in 0..self.workers.len() {
                let slot = &self.workers[(first + offset) % self.workers.len()];
                match slot.try_lock() {
                    Ok(mut worker) => {
                        let remaining = deadline.saturating_duration_since(Instant::now());
                        return task(&mut worker, remaining);
                    }
                    Err(TryLockError::WouldBlock) => continue,
                    Err(TryLockError::Poisoned(_)) => {
                        return Err(TaggerError::Unavailable("HeidelTime worker poisoned".into()))
                    }
                }
            }
            if Instant::now() >= deadline {
                return Err(TaggerError::Timeout(timeout));
            }
            thread::sleep(BUSY_RETRY);
        }
    }
}

impl TemporalTagger for HeidelTimePool {
    fn tag(
        &self,
        request: &TemporalRequest<'_>,
        timeout: Duration,
    ) -> Result<Vec<TemporalExpression>, TaggerError> {
        let reply = self.with_worker(timeout, |worker, remaining| {
            worker.process(request.text, remaining)
        })?;
        parse_timeml(&reply)
    }
}

/// TIMEX3 annotations of a TimeML document with character offsets into its plain text
pub fn parse_timeml(document: &str) -> Result<Vec<TemporalExpression>, TaggerError> {
    let open = document
        .find("<TimeML>")
        .ok_or_else(|| TaggerError::Malformed("missing <TimeML> block".into()))?;
    let close = document
        .rfind("</TimeML>")
        .filter(|close| *close >= open)
        .ok_or_else(|| TaggerError::Malformed("missing </TimeML>".into()))?;

    let body = &document[open + "<TimeML>".len()..close];
    let mut rest = body.strip_prefix('\n').unwrap_or(body);
    let mut offset = 0usize;
    let mut expressions = Vec::new();

    while let Some(tag_start) = rest.find("<TIMEX3") {
        offset += unescape(&rest[..tag_start]).chars().count();

        let after_tag = &rest[tag_start..];
        let tag_end = after_tag
            .find('>')
            .ok_or_else(|| TaggerError::Malformed("unterminated TIMEX3 tag".into()))?;
        let attributes = &after_tag["<TIMEX3".len()..tag_end];
        let inner_and_rest = &after_tag[tag_end + 1..];
        let inner_end = inner_and_rest
            .find("</TIMEX3>")
            .ok_or_else(|| TaggerError::Malformed("missing </TIMEX3>".into()))?;

        let surface = unescape(&inner_and_rest[..inner_end]);
        let length = surface.chars().count();

        let timex_type = attribute(attributes, "type").map(|value| value.parse::<TimexType>());
        match (timex_type, attribute(attributes, "value")) {
            (Some(Ok(timex_type)), Some(value)) => expressions.push(TemporalExpression {
                timex_type,
                surface,
                value,
                start: offset,
                end: offset + length,
            }),
            _ => debug!("Skipping TIMEX3 without usable type/value: {}", attributes.trim()),
        }

        offset += length;
        rest = &inner_and_rest[inner_end + "</TIMEX3>".len()..];
    }

    Ok(expressions)
}

/// Value of `name="..."` inside a tag's attribute list
fn attribute(attributes: &str, name: &str) -> Option<String> {
    let mut rest = attributes;
    while let Some(eq) = rest.find('=') {
        let key = rest[..eq].trim();
        let after = rest[eq + 1..].trim_start();
        let quote = after.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let value_end = after[1..].find(quote)?;
        if key == name {
            return Some(unescape(&after[1..1 + value_end]));
        }
        rest = &after[1 + value_end + 1..];
    }
    None
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
