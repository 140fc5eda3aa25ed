//! サーバーから返るレコードの受け口。
//!
//! フィールドはすべて任意扱いで、型違いの値は `None` として読み飛ばす。
//! 既定値の補完は mappers 側で行う。

use serde::Deserialize;
use serde_json::Value;

pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// 文字列・数値を文字列として受け取り、それ以外は `None`
    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(text)) => Some(text),
            Some(Value::Number(number)) => Some(number.to_string()),
            _ => None,
        })
    }

    /// 数値または数値として読める文字列
    pub fn number(value: &Value) -> Option<f64> {
        let number = match value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            _ => None,
        };
        number.filter(|number| number.is_finite())
    }
}

fn pick_id<'a>(mongo_id: &'a Option<String>, id: &'a Option<String>) -> Option<&'a str> {
    mongo_id
        .as_deref()
        .or(id.as_deref())
        .filter(|value| !value.is_empty())
}

fn object_string<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedRecord {
    #[serde(rename = "_id", default, deserialize_with = "lenient::string")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub media: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: Option<String>,
    #[serde(rename = "createdAt", default, deserialize_with = "lenient::string")]
    pub created_at: Option<String>,
}

impl FeedRecord {
    pub fn record_id(&self) -> Option<&str> {
        pick_id(&self.mongo_id, &self.id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentRecord {
    #[serde(rename = "_id", default, deserialize_with = "lenient::string")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    /// populate 済みならユーザーオブジェクト、未 populate なら ID 文字列
    #[serde(rename = "userId", default)]
    pub user: Option<Value>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub message: Option<String>,
    #[serde(rename = "createdAt", default, deserialize_with = "lenient::string")]
    pub created_at: Option<String>,
}

impl CommentRecord {
    pub fn record_id(&self) -> Option<&str> {
        pick_id(&self.mongo_id, &self.id)
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|user| object_string(user, &["userName"]))
    }

    pub fn has_author(&self) -> bool {
        self.user_name().is_some() || self.author.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "_id", default, deserialize_with = "lenient::string")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: Option<String>,
    #[serde(rename = "startsAt", default, deserialize_with = "lenient::string")]
    pub starts_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cover: Option<String>,
    #[serde(rename = "coverImage", default, deserialize_with = "lenient::string")]
    pub cover_image: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub media: Option<String>,
}

impl EventRecord {
    pub fn record_id(&self) -> Option<&str> {
        pick_id(&self.mongo_id, &self.id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaRecord {
    #[serde(rename = "_id", default, deserialize_with = "lenient::string")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub media: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: Option<String>,
}

impl MediaRecord {
    pub fn record_id(&self) -> Option<&str> {
        pick_id(&self.mongo_id, &self.id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberRecord {
    #[serde(rename = "_id", default, deserialize_with = "lenient::string")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(rename = "userName", default, deserialize_with = "lenient::string")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: Option<String>,
    #[serde(rename = "phoneNumber", default, deserialize_with = "lenient::string")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub media: Option<String>,
}

impl MemberRecord {
    pub fn record_id(&self) -> Option<&str> {
        pick_id(&self.mongo_id, &self.id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionRecord {
    #[serde(rename = "_id", default, deserialize_with = "lenient::string")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    /// populate 済みのメンバー、またはメンバー ID
    #[serde(default)]
    pub member: Option<Value>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: Option<String>,
    #[serde(rename = "monthlyAmount", default)]
    pub monthly_amount: Option<Value>,
    #[serde(rename = "bhawanAmount", default)]
    pub bhawan_amount: Option<Value>,
}

impl CollectionRecord {
    pub fn record_id(&self) -> Option<&str> {
        pick_id(&self.mongo_id, &self.id)
    }

    pub fn member_id(&self) -> Option<&str> {
        let member = self.member.as_ref()?;
        let id = match member {
            Value::String(id) => Some(id.as_str()),
            Value::Object(_) => object_string(member, &["_id", "id"]),
            _ => None,
        };
        id.filter(|id| !id.is_empty())
    }

    pub fn member_name(&self) -> Option<&str> {
        self.member
            .as_ref()
            .and_then(|member| object_string(member, &["userName", "name"]))
    }

    /// 文字列のときだけ支払い状況ラベルとして扱う
    pub fn status_label(&self) -> Option<&str> {
        self.monthly_amount.as_ref().and_then(Value::as_str)
    }

    pub fn amount(&self) -> Option<f64> {
        self.bhawan_amount.as_ref().and_then(lenient::number)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BankDetailRecord {
    #[serde(rename = "bankName", default, deserialize_with = "lenient::string")]
    pub bank_name: Option<String>,
    #[serde(rename = "accountName", default, deserialize_with = "lenient::string")]
    pub account_name: Option<String>,
    #[serde(rename = "accountNumber", default, deserialize_with = "lenient::string")]
    pub account_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub ifsc: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub swift: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReliefFundRecord {
    #[serde(rename = "_id", default, deserialize_with = "lenient::string")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default)]
    pub goal: Option<Value>,
    #[serde(default)]
    pub raised: Option<Value>,
    #[serde(rename = "contactEmail", default, deserialize_with = "lenient::string")]
    pub contact_email: Option<String>,
    #[serde(rename = "bankDetails", default)]
    pub bank_details: Option<Vec<BankDetailRecord>>,
}

impl ReliefFundRecord {
    pub fn record_id(&self) -> Option<&str> {
        pick_id(&self.mongo_id, &self.id)
    }

    pub fn goal(&self) -> Option<f64> {
        self.goal.as_ref().and_then(lenient::number)
    }

    pub fn raised(&self) -> Option<f64> {
        self.raised.as_ref().and_then(lenient::number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrong_scalar_types_are_dropped_instead_of_failing() {
        let record: FeedRecord = serde_json::from_value(json!({
            "_id": 42,
            "title": ["not", "a", "string"],
            "description": null,
        }))
        .unwrap();
        assert_eq!(record.record_id(), Some("42"));
        assert!(record.title.is_none());
        assert!(record.description.is_none());
    }

    #[test]
    fn mongo_id_wins_over_plain_id() {
        let record: EventRecord =
            serde_json::from_value(json!({ "_id": "abc", "id": "def" })).unwrap();
        assert_eq!(record.record_id(), Some("abc"));
    }

    #[test]
    fn collection_member_can_be_object_or_id() {
        let populated: CollectionRecord = serde_json::from_value(json!({
            "member": { "_id": "m-1", "userName": "Asha" },
            "bhawanAmount": "250",
            "monthlyAmount": "Paid",
        }))
        .unwrap();
        assert_eq!(populated.member_id(), Some("m-1"));
        assert_eq!(populated.member_name(), Some("Asha"));
        assert_eq!(populated.amount(), Some(250.0));
        assert_eq!(populated.status_label(), Some("Paid"));

        let bare: CollectionRecord =
            serde_json::from_value(json!({ "member": "m-2", "monthlyAmount": 500 })).unwrap();
        assert_eq!(bare.member_id(), Some("m-2"));
        assert_eq!(bare.member_name(), None);
        assert_eq!(bare.status_label(), None);
    }

    #[test]
    fn comment_user_name_comes_from_populated_user() {
        let record: CommentRecord = serde_json::from_value(json!({
            "userId": { "_id": "u-1", "userName": "Ravi" },
            "text": "See you there",
        }))
        .unwrap();
        assert_eq!(record.user_name(), Some("Ravi"));

        let unpopulated: CommentRecord =
            serde_json::from_value(json!({ "userId": "u-1" })).unwrap();
        assert_eq!(unpopulated.user_name(), None);
        assert!(!unpopulated.has_author());
    }
}
