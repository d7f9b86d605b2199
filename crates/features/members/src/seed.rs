//! Demonstration members loaded into a fresh album.

use crate::model::{Member, MemberId};
use chrono::NaiveDate;

struct Demo {
    name: &'static str,
    hint: &'static str,
    address: &'static str,
    time_at_church: &'static str,
    ministries: Option<&'static str>,
    role: &'static str,
    age: u32,
    born: (i32, u32, u32),
}

const DEMO: [Demo; 4] = [
    Demo {
        name: "João da Silva",
        hint: "man portrait",
        address: "Rua Exemplo, 123, Vila Velha, VR",
        time_at_church: "5 anos",
        ministries: Some("Louvor, Jovens"),
        role: "Líder de Jovens",
        age: 30,
        born: (1994, 3, 15),
    },
    Demo {
        name: "Maria Oliveira",
        hint: "woman portrait",
        address: "Avenida Principal, 456, Centro, VR",
        time_at_church: "Desde 2018",
        ministries: Some("Infantil"),
        role: "Professora",
        age: 28,
        born: (1996, 7, 22),
    },
    Demo {
        name: "Carlos Pereira",
        hint: "man smiling",
        address: "Travessa Paz, 789, Retiro, VR",
        time_at_church: "10 anos",
        ministries: Some("Diaconia"),
        role: "Diácono",
        age: 45,
        born: (1979, 1, 10),
    },
    Demo {
        name: "Ana Costa",
        hint: "woman smiling",
        address: "Rua das Flores, 101, Aterrado, VR",
        time_at_church: "2 anos",
        ministries: None,
        role: "Membro",
        age: 35,
        born: (1989, 11, 5),
    },
];

/// The four demonstration members, each with a fresh id and the placeholder photo.
#[must_use]
pub fn demo_members(placeholder_photo_url: &str) -> Vec<Member> {
    DEMO.iter()
        .filter_map(|demo| {
            let (y, m, d) = demo.born;
            Some(Member {
                id: MemberId::generate(),
                name: demo.name.to_owned(),
                photo_url: placeholder_photo_url.to_owned(),
                data_ai_hint: Some(demo.hint.to_owned()),
                address: demo.address.to_owned(),
                time_at_church: demo.time_at_church.to_owned(),
                serves_in_ministry: demo.ministries.is_some(),
                ministries_served: demo.ministries.map(str::to_owned),
                role: demo.role.to_owned(),
                age: demo.age,
                birth_date: NaiveDate::from_ymd_opt(y, m, d)?,
                is_baptized: None,
                photo: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_set_is_complete() {
        let members = demo_members("https://placehold.co/150x150.png");
        let names = members.iter().map(|m| m.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["João da Silva", "Maria Oliveira", "Carlos Pereira", "Ana Costa"]);

        assert!(members.iter().all(|m| m.photo_ref().is_none()));
        assert!(members.iter().all(|m| m.serves_in_ministry == m.ministries_served.is_some()));

        let mut ids = members.iter().map(|m| m.id.clone()).collect::<Vec<_>>();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }
}
