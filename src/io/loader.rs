// src/io/loader.rs

use crate::config::Config;
use crate::model::dataset::{DataError, Dataset, ElementSet};
use crate::state::AppState;
use gtk4::prelude::*;
use gtk4::{gio, glib};
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const DEFAULT_DATA_FILE: &str = "assets/elements.json";

/// Picks the element document to read. First match wins:
/// explicit argument, configured path, the file shipped next to the
/// executable (or under the install prefix), then the working directory.
pub fn resolve_data_path(cli_arg: Option<PathBuf>, config: &Config) -> PathBuf {
  let exe_dir = std::env::current_exe()
    .ok()
    .and_then(|p| p.parent().map(Path::to_path_buf));
  resolve_with(cli_arg, config, exe_dir.as_deref())
}

fn resolve_with(cli_arg: Option<PathBuf>, config: &Config, exe_dir: Option<&Path>) -> PathBuf {
  if let Some(p) = cli_arg {
    return p;
  }
  if let Some(p) = &config.data_path {
    return p.clone();
  }
  if let Some(dir) = exe_dir {
    // Next to the binary, or the packaged layout (bin/ + share/ptable3d/)
    let candidates = [
      dir.join(DEFAULT_DATA_FILE),
      dir.join("../share/ptable3d").join(DEFAULT_DATA_FILE),
    ];
    if let Some(found) = candidates.into_iter().find(|c| c.is_file()) {
      return found;
    }
  }
  PathBuf::from(DEFAULT_DATA_FILE)
}

/// Parses the raw bytes (or the read error) and installs the outcome, unless
/// a newer load has started since. Returns whether the outcome was installed.
fn finish_load(st: &mut AppState, generation: u64, path: &Path, raw: Result<&[u8], DataError>) -> bool {
  if !st.is_current_load(generation) {
    log::debug!("Discarding superseded read of {}", path.display());
    return false;
  }
  match raw.and_then(ElementSet::from_slice) {
    Ok(set) => {
      log::info!("Loaded {} elements from {}", set.len(), path.display());
      st.set_dataset(Dataset::new(set));
    }
    Err(e) => {
      log::error!("Failed to load {}: {}", path.display(), e);
      st.set_load_error(e.to_string());
    }
  }
  true
}

/// Reads the document on the main loop without blocking it. `on_done` runs
/// after the state has been updated, success or not; a read overtaken by a
/// later `spawn_load` is dropped without calling it. No retry.
pub fn spawn_load<F>(path: PathBuf, state: Rc<RefCell<AppState>>, on_done: F)
where
  F: Fn() + 'static,
{
  log::debug!("Reading element data from {}", path.display());
  let generation = state.borrow_mut().begin_load();

  glib::MainContext::default().spawn_local(async move {
    let file = gio::File::for_path(&path);
    let result = file.load_contents_future().await;
    let installed = {
      let mut st = state.borrow_mut();
      match &result {
        Ok((bytes, _etag)) => finish_load(&mut st, generation, &path, Ok(&bytes[..])),
        Err(e) => {
          let err = DataError::Io(io::Error::other(e.to_string()));
          finish_load(&mut st, generation, &path, Err(err))
        }
      }
    };
    if installed {
      on_done();
    }
  });
}
