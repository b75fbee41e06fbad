use std::future::Future;
use std::io;
use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::command::Runtime;
use super::error::SessionError;
use crate::models::ContainerRef;

/// Termination request received while a session owns the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Interrupt,
    Terminate,
}

/// Something that can deliver an interrupt to a running session
pub trait Interrupt {
    fn interrupt(&self) -> io::Result<()>;
}

/// A child process attached to the terminal for the length of a session
pub trait SessionProcess {
    type Interrupter: Interrupt;

    /// Command line, for messages
    fn describe(&self) -> String;

    fn start(&mut self) -> io::Result<Self::Interrupter>;

    fn wait(&mut self) -> impl Future<Output = io::Result<ExitStatus>>;
}

/// `<runtime> exec -it <container> <shell>` sharing our stdin/stdout/stderr
pub struct DockerExec {
    program: String,
    container_id: String,
    shell: String,
    child: Option<Child>,
}

impl DockerExec {
    pub fn new(program: &str, container_id: &str, shell: &str) -> Self {
        Self {
            program: program.to_string(),
            container_id: container_id.to_string(),
            shell: shell.to_string(),
            child: None,
        }
    }
}

impl SessionProcess for DockerExec {
    type Interrupter = ChildPid;

    fn describe(&self) -> String {
        format!("{} exec -it {} {}", self.program, self.container_id, self.shell)
    }

    fn start(&mut self) -> io::Result<ChildPid> {
        let child = Command::new(&self.program)
            .args(["exec", "-it", &self.container_id, &self.shell])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?;

        let pid = child
            .id()
            .ok_or_else(|| io::Error::other("session exited before it could be tracked"))?;
        self.child = Some(child);
        Ok(ChildPid(pid))
    }

    async fn wait(&mut self) -> io::Result<ExitStatus> {
        match self.child.as_mut() {
            Some(child) => child.wait().await,
            None => Err(io::Error::other("session was never started")),
        }
    }
}

/// Delivers SIGINT to a child by pid
#[derive(Debug, Clone, Copy)]
pub struct ChildPid(pub u32);

impl Interrupt for ChildPid {
    fn interrupt(&self) -> io::Result<()> {
        // SAFETY: kill(2) has no memory-safety preconditions.
        let rc = unsafe { libc::kill(self.0 as libc::pid_t, libc::SIGINT) };
        if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}

/// Process-wide SIGINT/SIGTERM listener, installed once for the whole run.
///
/// Outside a session the event loop polls it and quits; during a session its
/// receiver is handed to [`drive_session`]. The forwarding task is aborted
/// when this guard drops.
pub struct SignalListener {
    task: JoinHandle<()>,
    terminations: mpsc::Receiver<Termination>,
}

impl SignalListener {
    /// Must be called from within a tokio runtime
    pub fn install() -> Result<Self, SessionError> {
        let mut interrupt = signal(SignalKind::interrupt()).map_err(SessionError::Signals)?;
        let mut terminate = signal(SignalKind::terminate()).map_err(SessionError::Signals)?;
        let (tx, terminations) = mpsc::channel(4);

        let task = tokio::spawn(async move {
            loop {
                let reason = tokio::select! {
                    Some(()) = interrupt.recv() => Termination::Interrupt,
                    Some(()) = terminate.recv() => Termination::Terminate,
                    else => break,
                };
                if tx.send(reason).await.is_err() {
                    break;
                }
            }
        });

        Ok(Self { task, terminations })
    }

    /// Termination received since the last call, without waiting
    pub fn try_recv(&mut self) -> Option<Termination> {
        self.terminations.try_recv().ok()
    }

    pub async fn recv(&mut self) -> Option<Termination> {
        self.terminations.recv().await
    }

    /// Receiver to lend to a running session
    pub fn terminations(&mut self) -> &mut mpsc::Receiver<Termination> {
        &mut self.terminations
    }
}

impl Drop for SignalListener {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start `process` and wait for it, forwarding at most one termination as an interrupt
pub async fn drive_session<P: SessionProcess>(
    process: &mut P,
    terminations: &mut mpsc::Receiver<Termination>,
) -> Result<ExitStatus, SessionError> {
    let command = process.describe();

    let interrupter = process.start().map_err(|source| SessionError::Start {
        command: command.clone(),
        source,
    })?;
    tracing::info!(%command, "session started");

    let wait = process.wait();
    tokio::pin!(wait);

    let mut forwarded = false;
    let status = loop {
        tokio::select! {
            status = &mut wait => break status,
            Some(reason) = terminations.recv(), if !forwarded => {
                forwarded = true;
                tracing::info!(?reason, %command, "forwarding interrupt to session");
                if let Err(e) = interrupter.interrupt() {
                    tracing::error!(error = %e, "failed to interrupt session");
                }
            }
        }
    };

    let status = status.map_err(|source| SessionError::Wait {
        command: command.clone(),
        source,
    })?;

    if !status.success() {
        return Err(SessionError::Exit { command, status });
    }

    tracing::info!(%command, "session finished");
    Ok(status)
}

/// `docker exec` exit codes for a shell that is missing or not executable
const SHELL_UNAVAILABLE: [i32; 2] = [126, 127];

/// Open the first available shell in `shells` inside `container`, attached
/// to the current terminal.
///
/// The caller must have released the terminal (raw mode off, main screen)
/// before calling this.
pub async fn run_shell(
    runtime: &Runtime,
    container: &ContainerRef,
    shells: &[String],
    terminations: &mut mpsc::Receiver<Termination>,
) -> Result<ExitStatus, SessionError> {
    let mut last_err = SessionError::NoShell;

    for shell in shells {
        let mut exec = DockerExec::new(runtime.program(), &container.id, shell);
        match drive_session(&mut exec, terminations).await {
            Err(SessionError::Exit { command, status })
                if status.code().is_some_and(|c| SHELL_UNAVAILABLE.contains(&c)) =>
            {
                tracing::warn!(%command, ?status, "shell unavailable, trying next");
                last_err = SessionError::Exit { command, status };
            }
            other => return other,
        }
    }

    Err(last_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Notify;

    use crate::docker::testing::stub_runtime;

    #[derive(Default)]
    struct Counters {
        starts: AtomicUsize,
        waits: AtomicUsize,
        interrupts: AtomicUsize,
        exit: Notify,
    }

    struct StubProcess {
        fail_start: bool,
        exit_code: i32,
        counters: Arc<Counters>,
    }

    impl StubProcess {
        fn new(counters: Arc<Counters>) -> Self {
            Self {
                fail_start: false,
                exit_code: 0,
                counters,
            }
        }
    }

    struct StubInterrupter(Arc<Counters>);

    impl Interrupt for StubInterrupter {
        fn interrupt(&self) -> io::Result<()> {
            self.0.interrupts.fetch_add(1, Ordering::SeqCst);
            // An interrupted shell exits.
            self.0.exit.notify_one();
            Ok(())
        }
    }

    impl SessionProcess for StubProcess {
        type Interrupter = StubInterrupter;

        fn describe(&self) -> String {
            "stub exec -it abc123 /bin/sh".into()
        }

        fn start(&mut self) -> io::Result<StubInterrupter> {
            self.counters.starts.fetch_add(1, Ordering::SeqCst);
            if self.fail_start {
                return Err(io::Error::from(io::ErrorKind::NotFound));
            }
            Ok(StubInterrupter(self.counters.clone()))
        }

        async fn wait(&mut self) -> io::Result<ExitStatus> {
            self.counters.waits.fetch_add(1, Ordering::SeqCst);
            self.counters.exit.notified().await;
            Ok(ExitStatus::from_raw(self.exit_code << 8))
        }
    }

    #[tokio::test]
    async fn test_start_failure_skips_wait() {
        let counters = Arc::new(Counters::default());
        let mut process = StubProcess::new(counters.clone());
        process.fail_start = true;
        let (_tx, mut rx) = mpsc::channel(1);

        let err = drive_session(&mut process, &mut rx).await.unwrap_err();

        assert!(matches!(err, SessionError::Start { .. }));
        assert_eq!(counters.starts.load(Ordering::SeqCst), 1);
        assert_eq!(counters.waits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_termination_forwards_exactly_one_interrupt() {
        let counters = Arc::new(Counters::default());
        let mut process = StubProcess::new(counters.clone());
        let (tx, mut rx) = mpsc::channel(2);
        tx.send(Termination::Interrupt).await.unwrap();
        tx.send(Termination::Terminate).await.unwrap();

        let status = tokio::time::timeout(Duration::from_secs(5), drive_session(&mut process, &mut rx))
            .await
            .expect("session should end once interrupted")
            .unwrap();

        assert!(status.success());
        assert_eq!(counters.interrupts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_normal_exit_without_signal() {
        let counters = Arc::new(Counters::default());
        let mut process = StubProcess::new(counters.clone());
        let (_tx, mut rx) = mpsc::channel(1);
        counters.exit.notify_one();

        drive_session(&mut process, &mut rx).await.unwrap();

        assert_eq!(counters.waits.load(Ordering::SeqCst), 1);
        assert_eq!(counters.interrupts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_reported() {
        let counters = Arc::new(Counters::default());
        let mut process = StubProcess::new(counters.clone());
        process.exit_code = 130;
        let (_tx, mut rx) = mpsc::channel(1);
        counters.exit.notify_one();

        let err = drive_session(&mut process, &mut rx).await.unwrap_err();
        match err {
            SessionError::Exit { status, .. } => assert_eq!(status.code(), Some(130)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_docker_exec_arguments() {
        let mut exec = DockerExec::new("true", "abc123", "/bin/sh");
        assert_eq!(exec.describe(), "true exec -it abc123 /bin/sh");

        let (_tx, mut rx) = mpsc::channel(1);
        drive_session(&mut exec, &mut rx).await.unwrap();
    }

    #[tokio::test]
    async fn test_docker_exec_missing_binary() {
        let mut exec = DockerExec::new("/nonexistent/dockmenu-runtime", "abc123", "/bin/sh");
        let (_tx, mut rx) = mpsc::channel(1);

        let err = drive_session(&mut exec, &mut rx).await.unwrap_err();
        assert!(matches!(err, SessionError::Start { .. }));
    }

    #[tokio::test]
    async fn test_child_pid_delivers_sigint() {
        let mut child = Command::new("sleep").arg("30").spawn().unwrap();
        let pid = ChildPid(child.id().unwrap());

        pid.interrupt().unwrap();
        let status = tokio::time::timeout(Duration::from_secs(5), child.wait())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(status.signal(), Some(libc::SIGINT));
    }

    /// Wait until the listener reports `expected`; other tests may raise signals too
    async fn expect_termination(listener: &mut SignalListener, expected: Termination) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while let Some(reason) = listener.recv().await {
                if reason == expected {
                    return;
                }
            }
            panic!("listener closed before {expected:?} arrived");
        })
        .await
        .expect("signal should be reported");
    }

    #[tokio::test]
    async fn test_signal_listener_reports_terminate() {
        let mut listener = SignalListener::install().unwrap();

        // SAFETY: a SIGTERM handler is installed by the listener above.
        unsafe {
            libc::kill(libc::getpid(), libc::SIGTERM);
        }

        expect_termination(&mut listener, Termination::Terminate).await;
    }

    #[tokio::test]
    async fn test_listener_keeps_reporting_after_a_session() {
        let mut listener = SignalListener::install().unwrap();
        let counters = Arc::new(Counters::default());
        let mut process = StubProcess::new(counters.clone());
        counters.exit.notify_one();
        drive_session(&mut process, listener.terminations()).await.unwrap();

        // SAFETY: the listener's SIGTERM handler is still installed.
        unsafe {
            libc::kill(libc::getpid(), libc::SIGTERM);
        }

        expect_termination(&mut listener, Termination::Terminate).await;
    }

    #[tokio::test]
    async fn test_sigint_during_session_is_forwarded_once() {
        let mut listener = SignalListener::install().unwrap();
        let counters = Arc::new(Counters::default());
        let mut process = StubProcess::new(counters.clone());

        let raise = async {
            while counters.waits.load(Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            // SAFETY: the listener's SIGINT handler is installed.
            unsafe {
                libc::kill(libc::getpid(), libc::SIGINT);
            }
        };
        let session = tokio::time::timeout(
            Duration::from_secs(5),
            drive_session(&mut process, listener.terminations()),
        );

        let (result, ()) = tokio::join!(session, raise);

        result.expect("session should end once interrupted").unwrap();
        assert_eq!(counters.interrupts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_shell_falls_back_when_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let calls = dir.path().join("calls");
        let runtime = stub_runtime(
            dir.path(),
            &format!(
                "echo \"$4\" >> {}\n[ \"$4\" = /bin/bash ] && exit 127\nexit 0",
                calls.display()
            ),
        );
        let shells = vec!["/bin/bash".to_string(), "/bin/sh".to_string()];
        let (_tx, mut rx) = mpsc::channel(1);

        run_shell(&runtime, &ContainerRef::new("abc123", "web"), &shells, &mut rx)
            .await
            .unwrap();

        let tried = std::fs::read_to_string(&calls).unwrap();
        assert_eq!(tried.lines().collect::<Vec<_>>(), ["/bin/bash", "/bin/sh"]);
    }

    #[tokio::test]
    async fn test_shell_other_failures_do_not_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let calls = dir.path().join("calls");
        let runtime = stub_runtime(
            dir.path(),
            &format!("echo \"$4\" >> {}\nexit 1", calls.display()),
        );
        let shells = vec!["/bin/bash".to_string(), "/bin/sh".to_string()];
        let (_tx, mut rx) = mpsc::channel(1);

        let err = run_shell(&runtime, &ContainerRef::new("abc123", "web"), &shells, &mut rx)
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Exit { .. }));
        let tried = std::fs::read_to_string(&calls).unwrap();
        assert_eq!(tried.lines().collect::<Vec<_>>(), ["/bin/bash"]);
    }

    #[tokio::test]
    async fn test_shell_requires_a_shell() {
        let (_tx, mut rx) = mpsc::channel(1);
        let err = run_shell(&Runtime::new("true"), &ContainerRef::new("abc123", "web"), &[], &mut rx)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::NoShell));
    }
}
