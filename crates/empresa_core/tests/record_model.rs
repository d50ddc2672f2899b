use empresa_core::{Company, CompanyFields, Obligation, ObligationFields, ValidationError};
use serde_json::json;

#[test]
fn company_serializes_with_wire_names() {
    let company = Company {
        id: 1,
        fields: CompanyFields::new(
            "Empresa Teste",
            "12.345.678/0001-90",
            "Rua Teste",
            "email@teste.com",
            "1234567890",
        ),
        obligations: vec![Obligation {
            id: 3,
            fields: ObligationFields::new("DCTF", "mensal", 1),
        }],
    };

    let value = serde_json::to_value(&company).unwrap();
    assert_eq!(
        value,
        json!({
            "id": 1,
            "nome": "Empresa Teste",
            "cnpj": "12.345.678/0001-90",
            "endereco": "Rua Teste",
            "email": "email@teste.com",
            "telefone": "1234567890",
            "obrigacoes": [
                {"id": 3, "nome": "DCTF", "periodicidade": "mensal", "empresa_id": 1}
            ]
        })
    );
}

#[test]
fn company_fields_deserialize_from_request_body() {
    let fields: CompanyFields = serde_json::from_value(json!({
        "nome": "Empresa Teste",
        "cnpj": "12.345.678/0001-90",
        "endereco": "Rua Teste",
        "email": "email@teste.com",
        "telefone": "1234567890"
    }))
    .unwrap();
    assert_eq!(fields.tax_id, "12.345.678/0001-90");
    assert!(fields.validate().is_ok());
}

#[test]
fn company_fields_require_every_attribute() {
    let missing_phone = serde_json::from_value::<CompanyFields>(json!({
        "nome": "Empresa Teste",
        "cnpj": "1",
        "endereco": "Rua",
        "email": "email@teste.com"
    }));
    assert!(missing_phone.is_err());
}

#[test]
fn blank_name_fails_validation() {
    let fields = CompanyFields::new(" ", "1", "Rua", "email@teste.com", "1");
    assert_eq!(fields.validate(), Err(ValidationError::BlankField("nome")));
}

#[test]
fn conventional_period_check_ignores_case_and_padding() {
    assert!(ObligationFields::new("DCTF", " Mensal ", 1).has_conventional_period());
    assert!(ObligationFields::new("ECF", "ANUAL", 1).has_conventional_period());
    assert!(!ObligationFields::new("GIA", "semanal", 1).has_conventional_period());
}
