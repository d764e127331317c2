//! Bookkeeping for asynchronous asset loads

use shared::InstanceId;

use super::LayoutSession;
use crate::error::LoadError;
use crate::loader::{LoadCompletion, LoadDispatcher, LoadRequest, LoadedAsset};
use crate::placement::Placement;

impl LayoutSession {
    /// Loads the live design still needs. Each returned request is marked
    /// in flight and will not be handed out again until it completes.
    pub fn pending_loads(&mut self) -> Vec<LoadRequest> {
        let requests: Vec<LoadRequest> = self
            .live
            .design
            .furniture
            .iter()
            .filter(|inst| !self.placements.contains_key(&inst.id) && !self.in_flight.contains(&inst.id))
            .filter_map(|inst| {
                inst.asset.as_ref().map(|asset| LoadRequest {
                    instance_id: inst.id.clone(),
                    asset_path: asset.path.clone(),
                })
            })
            .collect();

        for request in &requests {
            self.in_flight.insert(request.instance_id.clone());
        }
        requests
    }

    pub fn is_loading(&self, id: &str) -> bool {
        self.in_flight.contains(id)
    }

    /// Apply a finished load.
    ///
    /// Returns `false` when the instance is no longer in the live design; the
    /// result is dropped without touching the design or the overlay. A failed
    /// load falls back to the proxy box.
    pub fn complete_load(&mut self, instance_id: &str, result: Result<LoadedAsset, LoadError>) -> bool {
        self.in_flight.remove(instance_id);
        let Some(inst) = self.live.design.instance(instance_id) else {
            tracing::debug!(instance = instance_id, "Discarding load for removed instance");
            return false;
        };
        let y_offset = inst.asset.as_ref().map_or(0.0, |a| a.y_offset);

        let placement = match result {
            Ok(asset) => Placement::Fitted { asset, y_offset },
            Err(e) => {
                tracing::warn!(instance = instance_id, "{e}, using proxy box");
                Placement::Proxy
            }
        };
        self.placements.insert(instance_id.to_string(), placement);
        self.refresh_rest_heights();
        self.version += 1;
        true
    }

    /// Hand every pending load to `dispatcher`; returns how many were sent
    pub fn dispatch_loads(&mut self, dispatcher: &LoadDispatcher) -> usize {
        let requests = self.pending_loads();
        let count = requests.len();
        for request in requests {
            dispatcher.dispatch(request);
        }
        if count > 0 {
            tracing::debug!(count, "Dispatched asset loads");
        }
        count
    }

    /// Apply every completion already queued on `dispatcher` without
    /// waiting. Returns the number applied.
    pub fn poll_loads(&mut self, dispatcher: &mut LoadDispatcher) -> usize {
        let mut applied = 0;
        while let Some(completion) = dispatcher.try_next() {
            if self.apply_completion(completion) {
                applied += 1;
            }
        }
        applied
    }

    pub fn apply_completion(&mut self, completion: LoadCompletion) -> bool {
        let LoadCompletion { instance_id, result } = completion;
        self.complete_load(&instance_id, result)
    }

    /// Ids with a load in flight
    pub fn loading_ids(&self) -> Vec<InstanceId> {
        let mut ids: Vec<InstanceId> = self.in_flight.iter().cloned().collect();
        ids.sort();
        ids
    }
}
