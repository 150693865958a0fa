use {
    agora_types::market::{Asset, AssetId, Config},
    plinth::{Counter, Item, Map},
};

pub const CONFIG: Item<Config> = Item::new("config");

/// Asset IDs count up from 1; zero is never a valid ID.
pub const NEXT_ASSET_ID: Counter<AssetId> = Counter::new("asset_id", 0, 1);

pub const ASSETS: Map<AssetId, Asset> = Map::new("asset");
