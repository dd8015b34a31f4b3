// PLC link descriptor and holding register map
//
// Nothing here talks to a controller. Protocol names are labels shown to
// operators alongside the synthesized readings.
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::phase::BatchPhase;
use super::sensor::SensorSample;

pub const PLC_ADDRESS: &str = "192.168.1.100:4840";
pub const PLC_REGISTER_COUNT: u16 = 48;
pub const TEMPERATURE_SETPOINT: f64 = 78.0;
pub const AGITATION_SETPOINT: u16 = 250;

const LINK_DROP_PROBABILITY: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlcProtocol {
    #[serde(rename = "OPC UA")]
    OpcUa,
    #[serde(rename = "Modbus TCP")]
    ModbusTcp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlcLinkStatus {
    pub connected: bool,
    pub protocol: PlcProtocol,
    pub address: String,
    /// Epoch milliseconds.
    pub last_poll: i64,
    pub poll_rate_ms: u64,
    pub registers: u16,
}

pub fn synthesize_link_status<R: Rng + ?Sized>(
    rng: &mut R,
    poll_rate_ms: u64,
    now: DateTime<Utc>,
) -> PlcLinkStatus {
    let connected = rng.r#gen::<f64>() > LINK_DROP_PROBABILITY;
    let protocol = if rng.gen_bool(0.5) {
        PlcProtocol::OpcUa
    } else {
        PlcProtocol::ModbusTcp
    };

    PlcLinkStatus {
        connected,
        protocol,
        address: PLC_ADDRESS.to_string(),
        last_poll: now.timestamp_millis(),
        poll_rate_ms,
        registers: PLC_REGISTER_COUNT,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegisterType {
    #[serde(rename = "FLOAT32")]
    Float32,
    #[serde(rename = "INT16")]
    Int16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegisterAccess {
    #[serde(rename = "R")]
    Read,
    #[serde(rename = "R/W")]
    ReadWrite,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlcRegister {
    pub address: u32,
    pub name: &'static str,
    pub value: f64,
    pub data_type: RegisterType,
    pub access: RegisterAccess,
}

impl PlcRegister {
    fn new(
        address: u32,
        name: &'static str,
        value: f64,
        data_type: RegisterType,
        access: RegisterAccess,
    ) -> Self {
        Self {
            address,
            name,
            value,
            data_type,
            access,
        }
    }
}

/// Holding registers as a Modbus client would read them for `sample`.
pub fn register_map(sample: &SensorSample, phase: BatchPhase) -> Vec<PlcRegister> {
    use RegisterAccess::{Read, ReadWrite};
    use RegisterType::{Float32, Int16};

    vec![
        PlcRegister::new(40001, "Temperature_PV", sample.temperature, Float32, Read),
        PlcRegister::new(40003, "Pressure_PV", sample.pressure, Float32, Read),
        PlcRegister::new(40005, "Conductivity_PV", sample.conductivity, Float32, Read),
        PlcRegister::new(40007, "Agitation_Speed", sample.agitation_speed, Int16, Read),
        PlcRegister::new(40008, "Motor_Current", sample.motor_current, Float32, Read),
        PlcRegister::new(40010, "Motor_Voltage", sample.motor_voltage, Float32, Read),
        PlcRegister::new(40012, "Vibration_RMS", sample.vibration, Float32, Read),
        PlcRegister::new(40014, "pH_Level", sample.ph_level, Float32, Read),
        PlcRegister::new(40016, "Flow_Rate", sample.flow_rate, Float32, Read),
        PlcRegister::new(40018, "Temp_SP", TEMPERATURE_SETPOINT, Float32, ReadWrite),
        PlcRegister::new(40020, "Agitation_SP", f64::from(AGITATION_SETPOINT), Int16, ReadWrite),
        PlcRegister::new(40021, "Batch_Phase", f64::from(phase.ordinal()), Int16, Read),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample() -> SensorSample {
        SensorSample {
            timestamp: 0,
            temperature: 78.4,
            pressure: 2.61,
            conductivity: 4.05,
            agitation_speed: 252.0,
            motor_current: 12.3,
            motor_voltage: 381.2,
            vibration: 2.44,
            ph_level: 7.1,
            flow_rate: 2.1,
        }
    }

    #[test]
    fn test_register_map_layout() {
        let registers = register_map(&sample(), BatchPhase::Reaction);
        assert_eq!(registers.len(), 12);
        assert_eq!(registers[0].address, 40001);
        assert_eq!(registers[0].value, 78.4);

        let phase = registers.iter().find(|r| r.name == "Batch_Phase").unwrap();
        assert_eq!(phase.value, 3.0);
        assert_eq!(phase.data_type, RegisterType::Int16);

        let writable: Vec<_> = registers
            .iter()
            .filter(|r| r.access == RegisterAccess::ReadWrite)
            .map(|r| r.name)
            .collect();
        assert_eq!(writable, vec!["Temp_SP", "Agitation_SP"]);
    }

    #[test]
    fn test_register_labels_serialize() {
        let registers = register_map(&sample(), BatchPhase::Loading);
        let json = serde_json::to_value(&registers[9]).unwrap();
        assert_eq!(json["dataType"], "FLOAT32");
        assert_eq!(json["access"], "R/W");
    }

    #[test]
    fn test_link_status() {
        let mut rng = StdRng::seed_from_u64(31);
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        let mut connected = 0;
        for _ in 0..1_000 {
            let status = synthesize_link_status(&mut rng, 2_000, now);
            assert_eq!(status.address, PLC_ADDRESS);
            assert_eq!(status.poll_rate_ms, 2_000);
            assert_eq!(status.last_poll, now.timestamp_millis());
            if status.connected {
                connected += 1;
            }
        }
        assert!(connected > 940, "connected {}", connected);

        let json = serde_json::to_value(synthesize_link_status(&mut rng, 500, now)).unwrap();
        let protocol = json["protocol"].as_str().unwrap();
        assert!(protocol == "OPC UA" || protocol == "Modbus TCP");
    }
}
