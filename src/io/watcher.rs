use std::path::Path;
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// A file system watcher for the shared list file.
///
/// Watches the containing directory (single-file watches miss the plain
/// overwrite pattern on some platforms) and filters events down to the list
/// file itself. The store's content digest stays the authority on whether a
/// reload actually happens; the watcher only says "worth checking".
pub struct ListWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<()>,
}

impl ListWatcher {
    /// Start watching the given list file's directory.
    pub fn start(list_path: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let file_name = list_path.file_name().map(|n| n.to_os_string());
        let dir = list_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                let relevant = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                if relevant {
                    let _ = tx.send(());
                }
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        Ok(ListWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Drain pending events without blocking. True if anything arrived.
    pub fn pending(&self) -> bool {
        let mut any = false;
        while self.rx.try_recv().is_ok() {
            any = true;
        }
        any
    }
}
