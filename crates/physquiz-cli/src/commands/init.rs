//! The `physquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create physquiz.toml
    if std::path::Path::new("physquiz.toml").exists() {
        println!("physquiz.toml already exists, skipping.");
    } else {
        std::fs::write("physquiz.toml", SAMPLE_CONFIG)?;
        println!("Created physquiz.toml");
    }

    // Create example questions file
    if std::path::Path::new("questions.json").exists() {
        println!("questions.json already exists, skipping.");
    } else {
        std::fs::write("questions.json", EXAMPLE_QUESTIONS)?;
        println!("Created questions.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit physquiz.toml (set sheets_url to deliver results)");
    println!("  2. Run: physquiz validate --questions questions.json");
    println!("  3. Run: physquiz play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# physquiz configuration

# Google Apps Script web-app URL. Leave commented to keep results local only.
# sheets_url = "https://script.google.com/macros/s/XXXX/exec"
# Remote question source; the local file below is used when unset.
# questions_url = "https://example.com/questions.json"

questions_file = "questions.json"
store_dir = "./physquiz-results"
default_grade = "11-1"
sample_size = 5
monitor_enabled = true
"#;

const EXAMPLE_QUESTIONS: &str = r#"{
  "11-1": [
    {
      "id": "mru-1",
      "question": "Un auto recorre 100 m en 5 s con velocidad constante. ¿Cuál es su velocidad?",
      "options": ["20 m/s", "500 m/s", "0.05 m/s", "105 m/s"],
      "correctAnswer": 0
    },
    {
      "id": "newton-2",
      "question": "¿Qué fuerza neta se necesita para acelerar una masa de 10 kg a 3 m/s²?",
      "options": ["3.3 N", "13 N", "30 N", "0.3 N"],
      "correctAnswer": 2
    },
    {
      "id": "energia-1",
      "question": "La energía cinética de un cuerpo depende de:",
      "options": [
        "Su masa y su velocidad",
        "Solo su masa",
        "Solo su altura",
        "Su temperatura"
      ],
      "correctAnswer": 0
    },
    {
      "id": "ondas-1",
      "question": "Si la frecuencia de una onda es 50 Hz, ¿cuál es su periodo?",
      "options": ["0.02 s", "50 s", "2 s", "0.5 s"],
      "correctAnswer": 0
    },
    {
      "id": "grav-1",
      "question": "¿Cuál es aproximadamente la aceleración de la gravedad en la superficie terrestre?",
      "options": ["9.8 m/s²", "1.6 m/s²", "98 m/s²", "0.98 m/s²"],
      "correctAnswer": 0
    },
    {
      "id": "termo-1",
      "question": "El calor fluye espontáneamente desde un cuerpo:",
      "options": [
        "Caliente hacia uno frío",
        "Frío hacia uno caliente",
        "Grande hacia uno pequeño",
        "Sólido hacia uno líquido"
      ],
      "correctAnswer": 0
    }
  ],
  "11-2": [
    {
      "id": "circ-1",
      "question": "Según la ley de Ohm, si V = 12 V y R = 4 Ω, la corriente es:",
      "options": ["3 A", "48 A", "0.33 A", "8 A"],
      "correctAnswer": 0
    },
    {
      "id": "optica-1",
      "question": "La velocidad de la luz en el vacío es aproximadamente:",
      "options": ["3×10⁸ m/s", "3×10⁶ m/s", "3×10¹⁰ m/s", "340 m/s"],
      "correctAnswer": 0
    }
  ]
}
"#;
