#![allow(dead_code)]

use battle_engine::codec::encode_attack;
use battle_engine::{determine_winner, Address, Attack, BattleId, BattleRecord, TokenId, Winner};
use clash_client::collaborators::{
    AttackSubmitted, BattleStarted, ContractReader, ContractWriter, MetadataStore, MintingService,
    PendingTx, Transfer, TxReceipt, WalletConnector,
};
use clash_client::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

pub fn addr(n: u8) -> Address {
    Address::new([n; 20])
}

#[derive(Default)]
pub struct ChainState {
    pub block: u64,
    pub counter: BattleId,
    pub battles: BTreeMap<BattleId, BattleRecord>,
    pub wins: BTreeMap<TokenId, u64>,
    pub owners: BTreeMap<TokenId, Address>,
    pub uris: BTreeMap<TokenId, String>,
    pub started: Vec<(u64, BattleStarted)>,
    pub attacks: Vec<(u64, AttackSubmitted)>,
    pub transfers: Vec<(u64, Transfer)>,
    pub balances: BTreeMap<Address, u128>,
    pub rewards: [u128; 3],
    pub minted: Vec<(Address, String, u128)>,
    /// Battles whose `get_battle` call errors.
    pub broken_battles: BTreeSet<BattleId>,
    /// Tokens whose `get_wins` call errors.
    pub broken_wins: BTreeSet<TokenId>,
    pub fail_mint_uri: Option<String>,
    /// Transaction hashes read back before waiting.
    pub announced: Vec<String>,
}

/// In-memory stand-in for the game contracts, acting for one signer.
pub struct FakeChain {
    pub state: Mutex<ChainState>,
    pub signer: Address,
}

impl FakeChain {
    pub fn new(signer: Address) -> Self {
        Self {
            state: Mutex::new(ChainState {
                block: 100,
                ..ChainState::default()
            }),
            signer,
        }
    }

    pub fn as_signer(&self, signer: Address) -> FakeWriter<'_> {
        FakeWriter { chain: self, signer }
    }

    pub fn give_token(&self, owner: Address, token_id: TokenId) {
        let mut s = self.state.lock().unwrap();
        s.block += 1;
        let block = s.block;
        s.owners.insert(token_id, owner);
        s.uris.insert(token_id, format!("ipfs://QmMeta{token_id}"));
        s.transfers.push((
            block,
            Transfer {
                from: Address::ZERO,
                to: owner,
                token_id,
            },
        ));
    }

    pub fn advance(&self, blocks: u64) {
        self.state.lock().unwrap().block += blocks;
    }

    fn open_battle(&self, signer: Address, token1: TokenId, token2: TokenId, attack: Attack) -> Result<TxReceipt> {
        let mut s = self.state.lock().unwrap();
        let owner1 = *s.owners.get(&token1).ok_or_else(|| Error::Rpc("unknown token".into()))?;
        let owner2 = *s.owners.get(&token2).ok_or_else(|| Error::Rpc("unknown token".into()))?;
        if owner1 != signer {
            return Err(Error::Rpc("execution reverted: not token owner".into()));
        }
        s.block += 1;
        s.counter += 1;
        let (block, id) = (s.block, s.counter);
        s.battles.insert(
            id,
            BattleRecord {
                battle_id: id,
                player1: owner1,
                player2: owner2,
                token_id1: token1,
                token_id2: token2,
                attack1: encode_attack(attack).into(),
                attack2: String::new(),
                player1_played: true,
                player2_played: false,
            },
        );
        s.started.push((
            block,
            BattleStarted {
                battle_id: id,
                player1: owner1,
                player2: owner2,
                token_id1: token1,
                token_id2: token2,
            },
        ));
        s.attacks.push((
            block,
            AttackSubmitted {
                battle_id: id,
                player: owner1,
                token_id: token1,
                attack: encode_attack(attack).into(),
            },
        ));
        Ok(TxReceipt {
            hash: format!("0xstart{id}"),
            block_number: block,
        })
    }

    fn answer(&self, signer: Address, battle_id: BattleId, token_id: TokenId, attack: Attack) -> Result<TxReceipt> {
        let mut s = self.state.lock().unwrap();
        s.block += 1;
        let block = s.block;
        let battle = s
            .battles
            .get_mut(&battle_id)
            .ok_or_else(|| Error::Rpc("execution reverted: no battle".into()))?;
        if battle.player2 != signer || battle.token_id2 != token_id || battle.player2_played {
            return Err(Error::Rpc("execution reverted: not your turn".into()));
        }
        battle.attack2 = encode_attack(attack).into();
        battle.player2_played = true;
        let winner_token = match determine_winner(battle)? {
            Winner::Player1 => Some(battle.token_id1),
            Winner::Player2 => Some(battle.token_id2),
            Winner::Draw => None,
        };
        if let Some(token) = winner_token {
            *s.wins.entry(token).or_default() += 1;
        }
        s.attacks.push((
            block,
            AttackSubmitted {
                battle_id,
                player: signer,
                token_id,
                attack: encode_attack(attack).into(),
            },
        ));
        Ok(TxReceipt {
            hash: format!("0xattack{battle_id}"),
            block_number: block,
        })
    }
}

fn in_window<T: Clone>(logs: &[(u64, T)], from: u64, to: u64) -> Vec<T> {
    logs.iter()
        .filter(|(block, _)| *block >= from && *block <= to)
        .map(|(_, log)| log.clone())
        .collect()
}

impl ContractReader for FakeChain {
    async fn latest_block(&self) -> Result<u64> {
        Ok(self.state.lock().unwrap().block)
    }

    async fn get_battle(&self, battle_id: BattleId) -> Result<BattleRecord> {
        let s = self.state.lock().unwrap();
        if s.broken_battles.contains(&battle_id) {
            return Err(Error::Rpc(format!("getBattle({battle_id}) timed out")));
        }
        s.battles
            .get(&battle_id)
            .cloned()
            .ok_or_else(|| Error::Rpc(format!("no battle {battle_id}")))
    }

    async fn get_wins(&self, token_id: TokenId) -> Result<u64> {
        let s = self.state.lock().unwrap();
        if s.broken_wins.contains(&token_id) {
            return Err(Error::Rpc(format!("getWins({token_id}) timed out")));
        }
        Ok(s.wins.get(&token_id).copied().unwrap_or(0))
    }

    async fn get_battle_counter(&self) -> Result<BattleId> {
        Ok(self.state.lock().unwrap().counter)
    }

    async fn query_battle_started_events(&self, from_block: u64, to_block: u64) -> Result<Vec<BattleStarted>> {
        Ok(in_window(&self.state.lock().unwrap().started, from_block, to_block))
    }

    async fn query_attack_submitted_events(&self, from_block: u64, to_block: u64) -> Result<Vec<AttackSubmitted>> {
        Ok(in_window(&self.state.lock().unwrap().attacks, from_block, to_block))
    }

    async fn query_transfer_events(&self, from_block: u64, to_block: u64) -> Result<Vec<Transfer>> {
        Ok(in_window(&self.state.lock().unwrap().transfers, from_block, to_block))
    }

    async fn tokens_of_owner(&self, owner: Address) -> Result<Vec<TokenId>> {
        let s = self.state.lock().unwrap();
        Ok(s.owners
            .iter()
            .filter(|(_, o)| **o == owner)
            .map(|(t, _)| *t)
            .collect())
    }

    async fn token_uri(&self, token_id: TokenId) -> Result<String> {
        let s = self.state.lock().unwrap();
        s.uris
            .get(&token_id)
            .cloned()
            .ok_or_else(|| Error::Rpc(format!("no token {token_id}")))
    }

    async fn token_balance(&self, owner: Address) -> Result<u128> {
        Ok(self.state.lock().unwrap().balances.get(&owner).copied().unwrap_or(0))
    }

    async fn place_rewards(&self) -> Result<[u128; 3]> {
        Ok(self.state.lock().unwrap().rewards)
    }
}

pub struct FakeTx<'a> {
    chain: &'a FakeChain,
    hash: String,
    outcome: Result<TxReceipt>,
}

impl PendingTx for FakeTx<'_> {
    fn hash(&self) -> &str {
        self.chain.state.lock().unwrap().announced.push(self.hash.clone());
        &self.hash
    }

    async fn wait(self) -> Result<TxReceipt> {
        self.outcome
    }
}

fn pending(chain: &FakeChain, outcome: Result<TxReceipt>) -> FakeTx<'_> {
    let hash = match &outcome {
        Ok(receipt) => receipt.hash.clone(),
        Err(_) => "0xreverted".into(),
    };
    FakeTx { chain, hash, outcome }
}

pub struct FakeWriter<'a> {
    chain: &'a FakeChain,
    signer: Address,
}

impl<'a> ContractWriter for FakeWriter<'a> {
    type Tx = FakeTx<'a>;

    async fn start_battle(&self, token_id1: TokenId, token_id2: TokenId, attack: Attack) -> Result<FakeTx<'a>> {
        let outcome = self.chain.open_battle(self.signer, token_id1, token_id2, attack);
        Ok(pending(self.chain, outcome))
    }

    async fn submit_attack(&self, battle_id: BattleId, token_id: TokenId, attack: Attack) -> Result<FakeTx<'a>> {
        let outcome = self.chain.answer(self.signer, battle_id, token_id, attack);
        Ok(pending(self.chain, outcome))
    }

    async fn safe_mint(&self, owner: Address, metadata_uri: &str, value_wei: u128) -> Result<FakeTx<'a>> {
        let mut s = self.chain.state.lock().unwrap();
        if s.fail_mint_uri.as_deref() == Some(metadata_uri) {
            return Err(Error::Rpc("execution reverted: Maximum number of NFTs minted".into()));
        }
        s.block += 1;
        let block = s.block;
        s.minted.push((owner, metadata_uri.to_string(), value_wei));
        let receipt = TxReceipt {
            hash: format!("0xmint{}", s.minted.len()),
            block_number: block,
        };
        drop(s);
        Ok(pending(self.chain, Ok(receipt)))
    }
}

/// Metadata store backed by a map of content id -> bytes.
#[derive(Default)]
pub struct FakeStore {
    pub blobs: BTreeMap<String, Vec<u8>>,
}

impl FakeStore {
    pub fn put(&mut self, cid: &str, json: &str) {
        self.blobs.insert(cid.to_string(), json.as_bytes().to_vec());
    }
}

impl MetadataStore for FakeStore {
    async fn fetch(&self, content_id: &str) -> Result<Vec<u8>> {
        self.blobs
            .get(content_id)
            .cloned()
            .ok_or_else(|| Error::Metadata(format!("{content_id} not pinned")))
    }
}

pub struct FakeMinter {
    pub uris: Vec<String>,
}

impl MintingService for FakeMinter {
    async fn mint(&self, _owner: Address) -> Result<Vec<String>> {
        Ok(self.uris.clone())
    }
}

/// Browser-wallet stand-in. `connect` hands out the first unlocked account,
/// or rejects the request when none are unlocked.
#[derive(Default)]
pub struct FakeWallet {
    pub unlocked: Mutex<Vec<Address>>,
    pub current: Mutex<Option<Address>>,
    pub disconnects: Mutex<usize>,
    listeners: Mutex<Vec<UnboundedSender<Vec<Address>>>>,
}

impl FakeWallet {
    pub fn with_accounts(accounts: Vec<Address>) -> Self {
        Self {
            unlocked: Mutex::new(accounts),
            ..Self::default()
        }
    }

    /// The user switched or revoked accounts in the wallet UI.
    pub fn switch(&self, accounts: Vec<Address>) {
        *self.current.lock().unwrap() = accounts.first().copied();
        *self.unlocked.lock().unwrap() = accounts.clone();
        for listener in self.listeners.lock().unwrap().iter() {
            let _ = listener.send(accounts.clone());
        }
    }

    /// The wallet extension went away; ends every notification stream.
    pub fn close(&self) {
        self.listeners.lock().unwrap().clear();
    }
}

impl WalletConnector for FakeWallet {
    async fn connect(&self) -> Result<Address> {
        let first = self.unlocked.lock().unwrap().first().copied();
        let address = first.ok_or_else(|| Error::Wallet("User rejected the request.".into()))?;
        *self.current.lock().unwrap() = Some(address);
        Ok(address)
    }

    fn disconnect(&self) {
        *self.disconnects.lock().unwrap() += 1;
        *self.current.lock().unwrap() = None;
    }

    fn current_address(&self) -> Option<Address> {
        *self.current.lock().unwrap()
    }

    fn accounts_changed(&self) -> UnboundedReceiver<Vec<Address>> {
        let (tx, rx) = unbounded_channel();
        self.listeners.lock().unwrap().push(tx);
        rx
    }
}
