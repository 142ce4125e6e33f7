//! Session glue: boots the engine from the persisted snapshot and drives the
//! reconciler. Both trigger surfaces (CLI one-shots and the server loop) go
//! through here, so all PlayerState mutation stays behind one writer.

use std::path::PathBuf;
use std::time::Instant;

use crate::engine::{Engine, LogKind};
use crate::persist::{
    load_or_create_player_id, JsonFileStore, PlayerSnapshot, Reconciler, SnapshotStore,
};

pub struct Session {
    pub engine: Engine,
    pub player_id: String,
    pub reconciler: Reconciler,
    store: Option<JsonFileStore>,
}

impl Session {
    /// Startup sequence: identity, one-shot remote pull (persistence
    /// suppressed so no loopback write escapes), then engine initialization.
    /// A failed pull degrades to local defaults; it never blocks the session.
    pub fn open(data_dir: PathBuf, sync_enabled: bool, seed: u64) -> Self {
        let store = sync_enabled.then(|| JsonFileStore::new(&data_dir));
        let player_id = load_or_create_player_id(&data_dir);
        let mut engine = Engine::new(seed);
        let mut reconciler = Reconciler::new(store.is_some());
        reconciler.suppress();

        let mut needs_profile = false;
        match &store {
            Some(store) => match store.load(&player_id) {
                Ok(Some(snapshot)) => {
                    engine.apply_remote(&snapshot);
                    engine.log(LogKind::Status, "Sync link established. Progress synchronized.");
                }
                Ok(None) => {
                    needs_profile = true;
                }
                Err(err) => {
                    eprintln!("snapshot pull failed for {player_id}: {err}");
                    engine.log(
                        LogKind::Alert,
                        "Sync link failed. Verify configuration and console output.",
                    );
                }
            },
            None => {
                engine.log(
                    LogKind::Status,
                    "Cloud sync offline. Unset SHADOWGYM_SYNC=off to enable persistence.",
                );
            }
        }

        engine.initialize();
        // Startup mutations must not loop back into a write.
        let _ = engine.take_dirty();

        if needs_profile {
            if let Some(store) = &store {
                let snapshot = PlayerSnapshot::capture(&engine.state);
                match store.save(&player_id, &snapshot) {
                    Ok(()) => engine.log(
                        LogKind::Status,
                        "Sync profile created. Progress will sync automatically.",
                    ),
                    Err(err) => eprintln!("initial snapshot write failed for {player_id}: {err}"),
                }
            }
        }

        reconciler.resume();
        Self {
            engine,
            player_id,
            reconciler,
            store,
        }
    }

    /// Forward the engine's dirty flag and run any due save attempt. Called
    /// once per iteration of the owning loop; never blocks the caller beyond
    /// the write itself.
    pub fn pump(&mut self, now: Instant) {
        if self.engine.take_dirty() {
            self.reconciler.mark_dirty(now);
        }
        if self.reconciler.poll(now) {
            let ok = self.write_snapshot();
            self.reconciler.finish(ok, now);
        }
    }

    /// Immediate write, bypassing the debounce. Used by short-lived CLI
    /// commands that cannot ride the debounce window.
    pub fn flush(&mut self) {
        let _ = self.engine.take_dirty();
        if self.store.is_some() {
            let _ = self.write_snapshot();
        }
    }

    pub fn sync_enabled(&self) -> bool {
        self.store.is_some()
    }

    fn write_snapshot(&mut self) -> bool {
        let Some(store) = &self.store else {
            return false;
        };
        let snapshot = PlayerSnapshot::capture(&self.engine.state);
        match store.save(&self.player_id, &snapshot) {
            Ok(()) => true,
            Err(err) => {
                // Operational channel only; the player-facing feed stays clean.
                eprintln!("snapshot write failed for {}: {err}", self.player_id);
                false
            }
        }
    }
}
