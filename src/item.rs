use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemType {
    #[default]
    Potion = 0,
    Weapon = 1,
    Armor = 2,
    Trinket = 3,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemRarity {
    #[default]
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: String,
    pub value: i32,
}

/// Serialized with the variant names under `type`/`rarity` and their numeric
/// ids under `typeId`/`rarityId`. The ids are ignored when reading one back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Item {
    pub level: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub rarity: ItemRarity,
    pub modifiers: Vec<StatModifier>,
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut item = serializer.serialize_struct("Item", 7)?;
        item.serialize_field("level", &self.level)?;
        item.serialize_field("name", &self.name)?;
        item.serialize_field("type", &self.item_type)?;
        item.serialize_field("rarity", &self.rarity)?;
        item.serialize_field("modifiers", &self.modifiers)?;
        item.serialize_field("typeId", &(self.item_type as u8))?;
        item.serialize_field("rarityId", &(self.rarity as u8))?;
        item.end()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ItemFactory;

impl ItemFactory {
    pub const DEFAULT_NAME: &'static str = "New Item";

    pub fn create_item(&self, level: u32, rarity: ItemRarity, item_type: ItemType) -> Item {
        Item {
            level,
            name: Self::DEFAULT_NAME.to_owned(),
            item_type,
            rarity,
            modifiers: vec![],
        }
    }
}
