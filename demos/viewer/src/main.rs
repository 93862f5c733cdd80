//! Opens the interior viewer.
//!
//! ```text
//! cargo run -- [living-room|bedroom|kitchen|bathroom] [asset ...]
//! ```
//!
//! Extra arguments replace the asset candidates of the chosen room. Passing
//! `none` shows the procedural furniture only.

use interior_ngin::{AssetCatalog, RoomType, ViewerConfig};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let room: RoomType = match args.next() {
        Some(id) => id.parse()?,
        None => RoomType::LivingRoom,
    };

    let mut config = ViewerConfig::default();
    let assets: Vec<String> = args.collect();
    if !assets.is_empty() {
        let mut catalog = AssetCatalog::empty();
        if assets != ["none"] {
            catalog.set(room, assets);
        }
        config = config.with_assets(catalog);
    }

    interior_ngin::run(config, room)
}
