use super::{id_or_generate, text_or};
use crate::application::ports::records::{BankDetailRecord, ReliefFundRecord};
use crate::domain::entities::{BankDetail, ReliefFund};

pub const DEFAULT_FUND_TITLE: &str = "Relief appeal";

fn map_bank_detail(detail: &BankDetailRecord) -> BankDetail {
    BankDetail {
        bank_name: text_or(detail.bank_name.as_ref(), "Bank"),
        account_name: text_or(detail.account_name.as_ref(), "Account"),
        account_number: text_or(detail.account_number.as_ref(), "N/A"),
        ifsc: detail.ifsc.clone(),
        swift: detail.swift.clone(),
    }
}

pub fn map_relief_fund(fund: &ReliefFundRecord) -> ReliefFund {
    ReliefFund {
        id: id_or_generate(fund.record_id()),
        title: text_or(fund.title.as_ref(), DEFAULT_FUND_TITLE),
        description: text_or(fund.description.as_ref(), ""),
        goal: fund.goal().unwrap_or(0.0),
        raised: fund.raised().unwrap_or(0.0),
        contact_email: fund.contact_email.clone(),
        bank_details: fund
            .bank_details
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(map_bank_detail)
            .collect(),
    }
}
