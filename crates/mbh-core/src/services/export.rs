//! CSV export of publicly listed houses

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};

use mbh_shared::utils::format_currency_plain;

use crate::domain::HouseListing;
use crate::error::DomainError;

pub const EXPORT_HEADER: [&str; 8] = [
    "House Code",
    "House Name",
    "Landlord Name",
    "Address",
    "Available Rooms",
    "Rent Range",
    "Contact Email",
    "Contact Phone",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvExport {
    pub data: String,
    pub filename: String,
}

impl CsvExport {
    pub fn verified_houses(houses: &[HouseListing], today: NaiveDate) -> Result<Self, DomainError> {
        Ok(Self {
            data: houses_to_csv(houses)?,
            filename: format!("verified_boarding_houses_{}.csv", today.format("%Y-%m-%d")),
        })
    }
}

/// Commas in addresses become semicolons; any other field holding a comma
/// or quote is quoted.
pub fn houses_to_csv(houses: &[HouseListing]) -> Result<String, DomainError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(EXPORT_HEADER)
        .map_err(|e| DomainError::ExportError(e.to_string()))?;

    for listing in houses {
        let house = &listing.house;
        let address = house.address.replace(',', ";");
        let available_rooms = house.available_rooms.to_string();
        let rent_range = format!(
            "{} - {}",
            format_currency_plain(house.rent_range_min),
            format_currency_plain(house.rent_range_max)
        );
        writer
            .write_record([
                house.house_code.as_str(),
                house.house_name.as_str(),
                listing.contact.landlord_name.as_str(),
                address.as_str(),
                available_rooms.as_str(),
                rent_range.as_str(),
                listing.contact.landlord_email.as_str(),
                listing.contact.landlord_phone.as_deref().unwrap_or(""),
            ])
            .map_err(|e| DomainError::ExportError(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DomainError::ExportError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DomainError::ExportError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoardingHouse, LandlordContact};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn listing(code: &str, address: &str) -> HouseListing {
        HouseListing {
            house: BoardingHouse {
                id: 1,
                landlord_id: 1,
                house_code: code.into(),
                house_name: "Sunrise Dorm".into(),
                description: None,
                address: address.into(),
                latitude: None,
                longitude: None,
                total_rooms: 12,
                available_rooms: 5,
                rent_range_min: Decimal::from(1500),
                rent_range_max: Decimal::from(3000),
                amenities: None,
                images: None,
                is_verified: true,
                is_active: true,
                created_at: Utc::now(),
                updated_at: None,
            },
            contact: LandlordContact {
                landlord_name: "Maria Santos".into(),
                landlord_email: "maria@example.com".into(),
                landlord_phone: Some("09171234567".into()),
            },
            distance: None,
        }
    }

    #[test]
    fn test_header_only_when_empty() {
        let csv = houses_to_csv(&[]).unwrap();
        assert_eq!(
            csv,
            "House Code,House Name,Landlord Name,Address,Available Rooms,Rent Range,Contact Email,Contact Phone\n"
        );
    }

    #[test]
    fn test_one_line_per_house_with_commas_replaced() {
        let houses = vec![
            listing("BHAAA111", "12 Mabini St, Lahug, Cebu City"),
            listing("BHBBB222", "Colon St"),
        ];
        let csv = houses_to_csv(&houses).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), houses.len() + 1);
        assert_eq!(
            lines[1],
            "BHAAA111,Sunrise Dorm,Maria Santos,12 Mabini St; Lahug; Cebu City,5,PHP 1500.00 - PHP 3000.00,maria@example.com,09171234567"
        );
        assert_eq!(lines[1].split(',').count(), 8);
    }

    #[test]
    fn test_comma_in_name_stays_in_one_column() {
        let mut house = listing("BHCCC333", "Colon St");
        house.house.house_name = "Sunrise Dorm, Annex".into();
        house.contact.landlord_name = "Santos, Maria".into();
        let data = houses_to_csv(&[house]).unwrap();

        let line = data.lines().nth(1).unwrap();
        assert_eq!(
            line,
            "BHCCC333,\"Sunrise Dorm, Annex\",\"Santos, Maria\",Colon St,5,PHP 1500.00 - PHP 3000.00,maria@example.com,09171234567"
        );

        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.len(), 8);
        assert_eq!(&record[1], "Sunrise Dorm, Annex");
    }

    #[test]
    fn test_filename_is_date_stamped() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let export = CsvExport::verified_houses(&[], today).unwrap();
        assert_eq!(export.filename, "verified_boarding_houses_2024-05-17.csv");
    }
}
