//! In-memory chain answering both `get_cells` and `send_transaction`.
//!
//! The node side resolves inputs against the live set and checks every
//! Omnilock input the way the lock script does: the lock field is zeroed, the
//! signing message is rebuilt, and the recovered Ethereum address must equal
//! the address carried in the lock args.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use sb_02_ledger_scanner::domain::entities::{HexRange, SearchFilter};
use sb_02_ledger_scanner::{
    CellsPage, IndexerClient, IndexerError, ScriptType, SearchKey, SearchMode,
};
use sb_04_transaction_signer::{
    prepare_signing_entries, recover_personal_signer, TransactionSkeleton, SIGNATURE_LEN,
};
use sb_05_submission_gate::{NodeClient, NodeError, OutputsValidator};
use shared_types::molecule::{unpack_bytes_opt, unpack_table};
use shared_types::{
    ckb_hash, Cell, CellOutput, ChainConfig, Hash, JsonRpcError, OutPoint, Script, ScriptInfo,
    Transaction, WitnessArgs,
};

struct ChainState {
    live: Vec<Cell>,
    tip: u64,
}

pub struct MockChain {
    omnilock: ScriptInfo,
    state: Mutex<ChainState>,
    pub indexer_calls: AtomicU32,
    pub submissions: AtomicU32,
}

impl MockChain {
    pub fn new(config: &ChainConfig) -> Self {
        Self {
            omnilock: config.omnilock.clone(),
            state: Mutex::new(ChainState {
                live: Vec::new(),
                tip: 1,
            }),
            indexer_calls: AtomicU32::new(0),
            submissions: AtomicU32::new(0),
        }
    }

    /// Create a cell out of thin air in a fresh block.
    pub fn mint(&self, output: CellOutput, data: Vec<u8>) -> Cell {
        let mut state = self.state.lock().unwrap();
        let block = state.tip;
        state.tip += 1;

        let cell = Cell {
            out_point: OutPoint::new(ckb_hash(&block.to_le_bytes()), 0),
            output,
            data,
            block_number: Some(block),
            tx_index: Some(0),
        };
        state.live.push(cell.clone());
        cell
    }

    pub fn live_cells(&self) -> Vec<Cell> {
        self.state.lock().unwrap().live.clone()
    }

    pub fn is_live(&self, out_point: &OutPoint) -> bool {
        self.state
            .lock()
            .unwrap()
            .live
            .iter()
            .any(|cell| &cell.out_point == out_point)
    }

    fn verify_omnilock(&self, tx: &Transaction, inputs: &[Cell]) -> Result<(), NodeError> {
        let mut unsigned = TransactionSkeleton {
            cell_deps: tx.cell_deps.clone(),
            header_deps: tx.header_deps.clone(),
            inputs: inputs.to_vec(),
            since: tx.inputs.iter().map(|input| input.since).collect(),
            outputs: tx.outputs.clone(),
            outputs_data: tx.outputs_data.clone(),
            witnesses: tx.witnesses.clone(),
            signing_entries: Vec::new(),
        };

        let mut claims = Vec::new();
        for (index, cell) in inputs.iter().enumerate() {
            let lock = &cell.output.lock;
            if !self.omnilock.matches(lock) {
                continue;
            }
            let witness = tx
                .witnesses
                .get(index)
                .ok_or_else(|| script_failure(index, "missing witness"))?;
            let mut args = WitnessArgs::unpack(witness)
                .map_err(|e| script_failure(index, &e.to_string()))?;
            let omni_lock = args
                .lock
                .clone()
                .ok_or_else(|| script_failure(index, "empty lock field"))?;

            let fields = unpack_table(&omni_lock, 1)
                .map_err(|e| script_failure(index, &e.to_string()))?;
            let signature: [u8; SIGNATURE_LEN] = unpack_bytes_opt(fields[0])
                .map_err(|e| script_failure(index, &e.to_string()))?
                .and_then(|raw| raw.try_into().ok())
                .ok_or_else(|| script_failure(index, "no signature"))?;
            claims.push((index, signature, lock.args[1..21].to_vec()));

            args.lock = Some(vec![0; omni_lock.len()]);
            unsigned.witnesses[index] = args.pack();
        }

        let entries = prepare_signing_entries(&unsigned, &self.omnilock)
            .map_err(|e| script_failure(0, &e.to_string()))?;
        for (index, signature, owner) in claims {
            let entry = entries
                .iter()
                .find(|entry| entry.index == index)
                .ok_or_else(|| script_failure(index, "no signing entry"))?;
            let signer = recover_personal_signer(&entry.message, &signature)
                .map_err(|e| script_failure(index, &e.to_string()))?;
            if signer[..] != owner[..] {
                return Err(script_failure(index, "signature does not match owner"));
            }
        }
        Ok(())
    }
}

fn script_failure(index: usize, cause: &str) -> NodeError {
    NodeError::Rpc(JsonRpcError {
        code: -302,
        message: format!(
            "TransactionFailedToVerify: Verification failed Script(Inputs[{index}].Lock: {cause})"
        ),
        data: None,
    })
}

fn script_matches(pattern: &Script, script: &Script, mode: SearchMode) -> bool {
    pattern.code_hash == script.code_hash
        && pattern.hash_type == script.hash_type
        && match mode {
            SearchMode::Prefix => script.args.starts_with(&pattern.args),
            SearchMode::Exact => script.args == pattern.args,
        }
}

fn in_range(len: usize, range: &[HexRange; 2]) -> bool {
    let len = len as u64;
    len >= range[0].0 && len < range[1].0
}

fn filter_matches(filter: &SearchFilter, other: Option<&Script>, data: &[u8]) -> bool {
    if let Some(pattern) = &filter.script {
        match other {
            Some(script) if script_matches(pattern, script, SearchMode::Prefix) => {}
            _ => return false,
        }
    }
    if let Some(range) = &filter.script_len_range {
        if !in_range(other.map(|s| s.pack().len()).unwrap_or(0), range) {
            return false;
        }
    }
    if let Some(range) = &filter.output_data_len_range {
        if !in_range(data.len(), range) {
            return false;
        }
    }
    true
}

fn key_matches(key: &SearchKey, cell: &Cell) -> bool {
    let (primary, other) = match key.script_type {
        ScriptType::Lock => (Some(&cell.output.lock), cell.output.type_.as_ref()),
        ScriptType::Type => (cell.output.type_.as_ref(), Some(&cell.output.lock)),
    };
    let Some(primary) = primary else {
        return false;
    };
    script_matches(&key.script, primary, key.script_search_mode)
        && key
            .filter
            .as_ref()
            .map_or(true, |filter| filter_matches(filter, other, &cell.data))
}

#[async_trait]
impl IndexerClient for MockChain {
    async fn get_cells(
        &self,
        search_key: &SearchKey,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<CellsPage, IndexerError> {
        self.indexer_calls.fetch_add(1, Ordering::SeqCst);
        let offset = match cursor {
            Some(c) => usize::from_str_radix(c.trim_start_matches("0x"), 16)
                .map_err(|e| IndexerError::Decode(e.to_string()))?,
            None => 0,
        };

        let state = self.state.lock().unwrap();
        let cells: Vec<Cell> = state
            .live
            .iter()
            .filter(|cell| key_matches(search_key, cell))
            .skip(offset)
            .take(limit as usize)
            .cloned()
            .collect();
        let end = offset + cells.len();
        Ok(CellsPage {
            cells,
            last_cursor: Some(format!("{end:#x}")),
        })
    }
}

#[async_trait]
impl NodeClient for MockChain {
    async fn send_transaction(
        &self,
        tx: &Transaction,
        _outputs_validator: OutputsValidator,
    ) -> Result<Hash, NodeError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);

        let inputs = {
            let state = self.state.lock().unwrap();
            let mut inputs = Vec::with_capacity(tx.inputs.len());
            for input in &tx.inputs {
                let cell = state
                    .live
                    .iter()
                    .find(|cell| cell.out_point == input.previous_output)
                    .ok_or_else(|| {
                        NodeError::Rpc(JsonRpcError {
                            code: -301,
                            message: format!(
                                "TransactionFailedToResolve: Resolve failed Dead(OutPoint({}))",
                                input.previous_output.index
                            ),
                            data: None,
                        })
                    })?;
                inputs.push(cell.clone());
            }
            inputs
        };
        self.verify_omnilock(tx, &inputs)?;

        let hash = tx.hash();
        let mut state = self.state.lock().unwrap();
        let block = state.tip;
        state.tip += 1;
        state
            .live
            .retain(|cell| !tx.inputs.iter().any(|i| i.previous_output == cell.out_point));
        for (index, (output, data)) in tx.outputs.iter().zip(&tx.outputs_data).enumerate() {
            state.live.push(Cell {
                out_point: OutPoint::new(hash, index as u32),
                output: output.clone(),
                data: data.clone(),
                block_number: Some(block),
                tx_index: Some(1),
            });
        }
        Ok(hash)
    }
}
