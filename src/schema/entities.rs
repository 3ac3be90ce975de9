//! Field tables of the five school entities.

use super::{DefaultValue, EntitySchema, FieldKind, FieldSpec, IdPolicy, Messages};

pub static USERS: EntitySchema = EntitySchema {
    entity: "users",
    label: "Usuário",
    id_policy: IdPolicy::ServerGenerated,
    sort_by: Some("name"),
    fields: &[
        FieldSpec::required("name", "Usuário precisa ter um 'name'"),
        FieldSpec::required("email", "Usuário precisa ter um 'email'"),
        FieldSpec::required("user", "Usuário precisa ter um 'user'"),
        FieldSpec::required("pwd", "Usuário precisa ter uma 'pwd'"),
        FieldSpec::present(
            "level",
            FieldKind::Text,
            "Usuário precisa ter um 'level' como string",
        ),
        FieldSpec::required("status", "Usuário precisa ter um 'status'"),
    ],
    messages: Messages {
        not_found: "Usuário não encontrado",
        created: "Usuário cadastrado com sucesso",
        deleted: "Usuário deletado com sucesso.",
    },
};

// Teachers answer with the user wording existing clients match on.
pub static TEACHERS: EntitySchema = EntitySchema {
    entity: "teachers",
    label: "Professor",
    id_policy: IdPolicy::ServerGenerated,
    sort_by: Some("name"),
    fields: &[
        FieldSpec::required("name", "Professor precisa ter um 'name'"),
        FieldSpec::required(
            "school_disciplines",
            "Professor precisa ter um 'school_disciplines'",
        ),
        FieldSpec::required("contact", "Professor precisa ter um 'contact'"),
        FieldSpec::required("phone_number", "Professor precisa ter um 'phone_number'"),
        FieldSpec::required("status", "Professor precisa ter um 'status'"),
    ],
    messages: Messages {
        not_found: "Usuário não encontrado",
        created: "Professor cadastrado com sucesso",
        deleted: "Usuário deletado com sucesso.",
    },
};

pub static STUDENTS: EntitySchema = EntitySchema {
    entity: "students",
    label: "Estudante",
    id_policy: IdPolicy::ServerGenerated,
    sort_by: Some("name"),
    fields: &[
        FieldSpec::required("name", "Estudante precisa ter um 'name'"),
        FieldSpec::required("age", "Estudante precisa ter uma 'age'"),
        FieldSpec::required("parents", "Estudante precisa ter 'parents'"),
        FieldSpec::required("phone_number", "Estudante precisa ter um 'phone_number'"),
        FieldSpec::required("special_needs", "Estudante precisa ter 'special_needs'"),
        FieldSpec::required("status", "Estudante precisa ter um 'status'"),
    ],
    messages: Messages {
        not_found: "Estudante não encontrado",
        created: "Estudante cadastrado com sucesso",
        deleted: "Estudante deletado com sucesso.",
    },
};

pub static EVENTS: EntitySchema = EntitySchema {
    entity: "events",
    label: "Evento",
    id_policy: IdPolicy::ServerGenerated,
    sort_by: None,
    fields: &[
        FieldSpec::required("description", "Evento precisa ter uma 'description'"),
        FieldSpec::required("comments", "Evento precisa ter 'comments'"),
        FieldSpec::optional(
            "date",
            FieldKind::DateTime,
            "Evento precisa ter uma 'date' como texto",
        )
        .defaulting_to(DefaultValue::LocalTimestamp),
    ],
    messages: Messages {
        not_found: "Evento não encontrado",
        created: "Evento cadastrado com sucesso",
        deleted: "Evento deletado com sucesso.",
    },
};

pub static APPOINTMENTS: EntitySchema = EntitySchema {
    entity: "appointments",
    label: "Agendamento",
    id_policy: IdPolicy::ServerGenerated,
    sort_by: None,
    fields: &[
        FieldSpec::required("specialty", "Agendamento precisa ter uma 'specialty'."),
        FieldSpec::required("comments", "Agendamento precisa ter 'comments'."),
        FieldSpec::required(
            "date",
            "Agendamento precisa ter uma 'date' no formato 'YYYY-MM-DD HH:mm:ss'.",
        )
        .of_kind(FieldKind::DateTime),
        FieldSpec::required("student", "Agendamento precisa ter um 'student'."),
        FieldSpec::required("professional", "Agendamento precisa ter um 'professional'."),
    ],
    messages: Messages {
        not_found: "Agendamento não encontrado",
        created: "Agendamento cadastrado com sucesso",
        deleted: "Agendamento deletado com sucesso.",
    },
};

/// Every schema mounted by the server, in route order.
pub fn all() -> [&'static EntitySchema; 5] {
    [&USERS, &TEACHERS, &STUDENTS, &EVENTS, &APPOINTMENTS]
}
