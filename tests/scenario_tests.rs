//! End-to-end scenarios driven through the builder and `fire`.

use canopy::builder::StateMachineBuilder;
use canopy::effects::{ActionError, Job, TokioExecutor, TransitionError};
use canopy::{event_enum, state_enum, Checkpoint, State};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

state_enum! {
    enum Task {
        Idle,
        Running,
        Paused,
    }
}

event_enum! {
    enum Command {
        Start,
        Pause,
        Resume,
        Reset,
    }
}

#[derive(Default)]
struct Session {
    allow_pause: bool,
    log: Vec<String>,
}

fn log_entry(state: &'static str) -> impl Fn(&Task, &Command, &mut Session) -> Result<(), ActionError> {
    move |_, _, session| {
        session.log.push(format!("enter {state}"));
        Ok(())
    }
}

fn log_exit(state: &'static str) -> impl Fn(&Task, &Command, &mut Session) -> Result<(), ActionError> {
    move |_, _, session| {
        session.log.push(format!("exit {state}"));
        Ok(())
    }
}

fn task_builder() -> StateMachineBuilder<Task, Command, Session> {
    StateMachineBuilder::new()
        .initial(Task::Idle)
        .state(Task::Idle, |s| {
            s.on(Command::Start, Task::Running)
                .on_entry(log_entry("Idle"))
                .on_exit(log_exit("Idle"))
        })
        .state(Task::Running, |s| {
            s.on_when(Command::Pause, Task::Paused, |session: &Session| {
                session.allow_pause
            })
            .on(Command::Reset, Task::Idle)
            .on_entry(log_entry("Running"))
            .on_exit(log_exit("Running"))
        })
        .state(Task::Paused, |s| {
            s.child_of(Task::Running)
                .on(Command::Resume, Task::Running)
                .on_entry(log_entry("Paused"))
                .on_exit(log_exit("Paused"))
        })
}

#[test]
fn start_enters_running() {
    let mut machine = task_builder().build().unwrap();
    let mut session = Session::default();

    assert!(machine.fire(Command::Start, &mut session).unwrap());

    assert_eq!(machine.state(), &Task::Running);
    assert_eq!(session.log, vec!["exit Idle", "enter Running"]);
}

#[test]
fn pause_is_unhandled_while_guard_fails() {
    let mut machine = task_builder().build().unwrap();
    let mut session = Session::default();
    machine.fire(Command::Start, &mut session).unwrap();
    session.log.clear();

    let handled = machine.fire(Command::Pause, &mut session).unwrap();

    assert!(!handled);
    assert_eq!(machine.state(), &Task::Running);
    assert!(session.log.is_empty());
}

#[test]
fn pause_into_child_runs_only_its_entry() {
    let mut machine = task_builder().build().unwrap();
    let mut session = Session {
        allow_pause: true,
        ..Session::default()
    };
    machine.fire(Command::Start, &mut session).unwrap();
    session.log.clear();

    assert!(machine.fire(Command::Pause, &mut session).unwrap());

    assert_eq!(machine.state(), &Task::Paused);
    assert_eq!(session.log, vec!["enter Paused"]);
    assert!(machine.is_in(&Task::Running).unwrap());
}

#[test]
fn resume_into_parent_runs_only_child_exit() {
    let mut machine = task_builder().build().unwrap();
    let mut session = Session {
        allow_pause: true,
        ..Session::default()
    };
    machine.fire(Command::Start, &mut session).unwrap();
    machine.fire(Command::Pause, &mut session).unwrap();
    session.log.clear();

    assert!(machine.fire(Command::Resume, &mut session).unwrap());

    assert_eq!(machine.state(), &Task::Running);
    assert_eq!(session.log, vec!["exit Paused"]);
}

#[test]
fn child_inherits_parent_handler() {
    let mut machine = task_builder().build().unwrap();
    let mut session = Session {
        allow_pause: true,
        ..Session::default()
    };
    machine.fire(Command::Start, &mut session).unwrap();
    machine.fire(Command::Pause, &mut session).unwrap();
    session.log.clear();

    assert!(machine.fire(Command::Reset, &mut session).unwrap());

    assert_eq!(machine.state(), &Task::Idle);
    assert_eq!(
        session.log,
        vec!["exit Paused", "exit Running", "enter Idle"]
    );
    let path: Vec<&str> = machine
        .history()
        .get_path()
        .into_iter()
        .map(|state| state.name())
        .collect();
    assert_eq!(path, vec!["Idle", "Running", "Paused", "Idle"]);
}

#[test]
fn failed_entry_leaves_state_unchanged() {
    let mut machine = task_builder()
        .state(Task::Running, |s| {
            s.on_entry(|_, _, _| Err(ActionError::new("device busy")))
        })
        .build()
        .unwrap();
    let mut session = Session::default();

    let err = machine.fire(Command::Start, &mut session).unwrap_err();

    assert!(matches!(err, TransitionError::ActionFailed { .. }));
    assert_eq!(err.to_string(), "entry action failed in state 'Running': device busy");
    assert_eq!(machine.state(), &Task::Idle);
    assert_eq!(session.log, vec!["exit Idle", "enter Running"]);
    assert!(machine.history().is_empty());
}

#[test]
fn checkpoint_survives_json_and_resumes() {
    let mut machine = task_builder().build().unwrap();
    let mut session = Session::default();
    machine.fire(Command::Start, &mut session).unwrap();

    let json = machine.checkpoint().to_json().unwrap();
    let checkpoint = Checkpoint::<Task>::from_json(&json).unwrap();
    let mut resumed = task_builder().resume(checkpoint).unwrap();

    assert_eq!(resumed.state(), &Task::Running);
    assert!(resumed.fire(Command::Reset, &mut session).unwrap());
    assert_eq!(resumed.history().len(), 2);
}

#[test]
fn fire_returns_before_delayed_async_entry_completes() {
    let submitted = Arc::new(Mutex::new(Vec::<thread::JoinHandle<()>>::new()));
    let workers = Arc::clone(&submitted);
    let executor = move |job: Job| {
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            job();
        });
        workers.lock().unwrap().push(handle);
    };

    let recorded_at = Arc::new(Mutex::new(None::<Instant>));
    let recorder = Arc::clone(&recorded_at);
    let mut machine = StateMachineBuilder::<Task, Command, Session>::new()
        .with_executor(executor)
        .initial(Task::Idle)
        .state(Task::Idle, |s| s.on(Command::Start, Task::Running))
        .state(Task::Running, move |s| {
            s.on_async_entry(move |_, _| {
                *recorder.lock().unwrap() = Some(Instant::now());
                Ok(())
            })
        })
        .build()
        .unwrap();

    let handled = machine.fire(Command::Start, &mut Session::default()).unwrap();
    let returned_at = Instant::now();

    assert!(handled);
    assert_eq!(machine.state(), &Task::Running);
    assert!(recorded_at.lock().unwrap().is_none());

    for handle in submitted.lock().unwrap().drain(..) {
        handle.join().unwrap();
    }
    let recorded = recorded_at.lock().unwrap().expect("async entry ran");
    assert!(returned_at < recorded);
}

#[test]
fn async_jobs_are_submitted_in_pipeline_order() {
    let trace: Arc<Mutex<Vec<String>>> = Arc::default();
    let queue: Arc<Mutex<Vec<Job>>> = Arc::default();
    let ran: Arc<Mutex<Vec<&'static str>>> = Arc::default();

    let (submissions, sink) = (Arc::clone(&trace), Arc::clone(&queue));
    let executor = move |job: Job| {
        submissions.lock().unwrap().push("submitted".to_string());
        sink.lock().unwrap().push(job);
    };
    let sync_step = |label: &'static str| {
        let trace = Arc::clone(&trace);
        move |_: &Task, _: &Command, _: &mut Session| -> Result<(), ActionError> {
            trace.lock().unwrap().push(label.to_string());
            Ok(())
        }
    };
    let async_step = |label: &'static str| {
        let ran = Arc::clone(&ran);
        move |_: Task, _: Command| -> Result<(), ActionError> {
            ran.lock().unwrap().push(label);
            Ok(())
        }
    };

    let mut machine = StateMachineBuilder::<Task, Command, Session>::new()
        .with_executor(executor)
        .initial(Task::Idle)
        .state(Task::Idle, |s| {
            s.on_exit(sync_step("exit Idle"))
                .on_async_exit(async_step("async exit Idle"))
                .on_async(Command::Start, Task::Running, async_step("async transition"))
        })
        .state(Task::Running, |s| {
            s.on_entry(sync_step("enter Running"))
                .on_async_entry(async_step("async enter Running"))
        })
        .build()
        .unwrap();

    assert!(machine.fire(Command::Start, &mut Session::default()).unwrap());

    assert_eq!(
        *trace.lock().unwrap(),
        vec![
            "exit Idle",
            "submitted",
            "submitted",
            "enter Running",
            "submitted"
        ]
    );
    assert!(ran.lock().unwrap().is_empty());

    for job in queue.lock().unwrap().drain(..) {
        job();
    }
    assert_eq!(
        *ran.lock().unwrap(),
        vec![
            "async exit Idle",
            "async transition",
            "async enter Running"
        ]
    );
}

#[test]
fn async_failure_is_not_reported_by_fire() {
    let ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&ran);
    let mut machine = StateMachineBuilder::<Task, Command, Session>::new()
        .initial(Task::Idle)
        .state(Task::Idle, move |s| {
            s.on_async_internal(Command::Pause, move |_, _| {
                flag.store(true, Ordering::SeqCst);
                Err(ActionError::new("lost"))
            })
        })
        .build()
        .unwrap();

    assert!(machine.fire(Command::Pause, &mut Session::default()).unwrap());
    assert!(ran.load(Ordering::SeqCst));
    assert_eq!(machine.state(), &Task::Idle);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn tokio_executor_runs_entry_off_the_dispatching_thread() {
    let (tx, rx) = mpsc::channel();
    let tx = Mutex::new(tx);
    let mut machine = StateMachineBuilder::<Task, Command, Session>::new()
        .with_executor(TokioExecutor::try_current().expect("inside a runtime"))
        .initial(Task::Idle)
        .state(Task::Idle, |s| s.on(Command::Start, Task::Running))
        .state(Task::Running, move |s| {
            s.on_async_entry(move |state, event| {
                tx.lock()
                    .unwrap()
                    .send((state, event, thread::current().id()))
                    .map_err(|e| ActionError::new(e.to_string()))
            })
        })
        .build()
        .unwrap();

    assert!(machine.fire(Command::Start, &mut Session::default()).unwrap());

    let (state, event, worker) =
        tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
    assert_eq!(state, Task::Idle);
    assert_eq!(event, Command::Start);
    assert_ne!(worker, thread::current().id());
}
