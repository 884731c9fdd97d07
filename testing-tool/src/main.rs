use anyhow::{anyhow, Result};
use colored::*;
use reqwest::{Client, Method};
use serde_json::{json, Value};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚗 Registro de Flota - Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = prompt("URL del API (enter = http://localhost:8000): ")?;
    let base_url = if base_url.is_empty() {
        "http://localhost:8000".to_string()
    } else {
        base_url.trim_end_matches('/').to_string()
    };

    let api = FleetApi {
        client: Client::new(),
        base_url,
        token: None,
    };

    // Paso 1: Pedir credenciales
    let credentials = get_credentials()?;

    // Paso 2: Autenticarse y obtener token
    let api = authenticate(api, &credentials).await?;

    // Paso 3: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 👤 Listar conductores");
        println!("2. 👤 Listar propietarios");
        println!("3. 🚗 Listar vehículos");
        println!("4. ➕ Crear conductor, propietario y vehículo de prueba");
        println!("5. 📊 Estadísticas del dashboard");
        println!("6. ⚠️  Alertas");
        println!("7. 🚪 Salir");

        match prompt("Selecciona una opción (1-7): ")?.as_str() {
            "1" => show(&api, Method::GET, "/api/drivers", None).await?,
            "2" => show(&api, Method::GET, "/api/owners", None).await?,
            "3" => show(&api, Method::GET, "/api/vehicles", None).await?,
            "4" => create_sample_fleet(&api).await?,
            "5" => show(&api, Method::GET, "/api/dashboard/stats", None).await?,
            "6" => show(&api, Method::GET, "/api/dashboard/alerts", None).await?,
            "7" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red()),
        }
    }

    Ok(())
}

struct FleetApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl FleetApi {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<(u16, Value)> {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path));

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        Ok((status, body))
    }
}

#[derive(Debug)]
struct Credentials {
    name: String,
    email: String,
    password: String,
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

fn get_credentials() -> Result<Credentials> {
    println!("{}", "🔐 CREDENCIALES".bright_cyan().bold());
    println!("{}", "===============".bright_cyan());

    Ok(Credentials {
        name: prompt("Nombre (solo para registro): ")?,
        email: prompt("Email: ")?,
        password: prompt("Password: ")?,
    })
}

/// Intenta login; si las credenciales no existen registra al usuario
async fn authenticate(mut api: FleetApi, credentials: &Credentials) -> Result<FleetApi> {
    println!();
    println!("{}", "🔐 AUTENTICANDO...".bright_cyan().bold());

    let login = json!({ "email": credentials.email, "password": credentials.password });
    let (status, body) = api.send(Method::POST, "/api/login", Some(login)).await?;

    let body = if status == 401 {
        println!("{}", "ℹ️  Usuario no encontrado, registrando...".bright_blue());
        let register = json!({
            "name": credentials.name,
            "email": credentials.email,
            "password": credentials.password,
        });
        let (status, body) = api.send(Method::POST, "/api/register", Some(register)).await?;
        if status != 201 {
            print_response(status, &body)?;
            return Err(anyhow!("❌ No se pudo registrar el usuario"));
        }
        body
    } else {
        body
    };

    let token = body
        .pointer("/data/access_token")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("❌ No se pudo extraer el token de la respuesta"))?;

    println!("{}", "✅ Autenticado".bright_green().bold());
    api.token = Some(token.to_string());
    Ok(api)
}

async fn show(api: &FleetApi, method: Method, path: &str, body: Option<Value>) -> Result<()> {
    println!();
    println!("{} {}", "📤".bright_blue(), path);
    let (status, body) = api.send(method, path, body).await?;
    print_response(status, &body)
}

fn print_response(status: u16, body: &Value) -> Result<()> {
    let label = format!("📥 HTTP {}", status);
    if status < 300 {
        println!("{}", label.bright_green().bold());
    } else {
        println!("{}", label.bright_red().bold());
    }
    println!("{}", serde_json::to_string_pretty(body)?);
    Ok(())
}

/// Crea un conductor, un propietario y un vehículo que los une
async fn create_sample_fleet(api: &FleetApi) -> Result<()> {
    let suffix = prompt("Sufijo numérico para los documentos (ej: 4521): ")?;

    let driver = json!({
        "cedula": format!("10203{}", suffix),
        "primer_nombre": "Carlos",
        "apellidos": "Pérez Gómez",
        "direccion": "Calle 10 # 20-30",
        "telefono": "3001234567",
        "ciudad": "Bogotá",
    });
    let (status, driver) = api.send(Method::POST, "/api/drivers", Some(driver)).await?;
    print_response(status, &driver)?;

    let owner = json!({
        "cedula": format!("90010{}", suffix),
        "primer_nombre": "María",
        "apellidos": "Rodríguez",
        "direccion": "Carrera 7 # 45-12",
        "telefono": "3109876543",
        "ciudad": "Medellín",
        "email": format!("maria{}@flota.co", suffix),
    });
    let (status, owner) = api.send(Method::POST, "/api/owners", Some(owner)).await?;
    print_response(status, &owner)?;

    let (Some(driver_id), Some(owner_id)) = (
        driver.pointer("/data/id").and_then(Value::as_str),
        owner.pointer("/data/id").and_then(Value::as_str),
    ) else {
        println!("{}", "⚠️ No se creó el vehículo: faltan conductor o propietario".bright_yellow());
        return Ok(());
    };

    let plate_digits: String = suffix.chars().filter(char::is_ascii_digit).take(3).collect();
    let vehicle = json!({
        "placa": format!("TST{:0>3}", plate_digits),
        "color": "Blanco",
        "marca": "Renault",
        "tipo_vehiculo": "private",
        "conductor_id": driver_id,
        "propietario_id": owner_id,
    });
    show(api, Method::POST, "/api/vehicles", Some(vehicle)).await
}
