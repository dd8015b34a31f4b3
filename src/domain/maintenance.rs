// Maintenance planning derived from equipment health
use serde::{Deserialize, Serialize};

use super::equipment::{MotorHealth, PowerStatus, PowerSupply};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaintenanceKind {
    Preventive,
    Predictive,
    Corrective,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaintenancePriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceItem {
    pub id: String,
    pub component: String,
    pub kind: MaintenanceKind,
    pub priority: MaintenancePriority,
    pub due_in: String,
    /// Percent, 0 = replace now.
    pub condition: u8,
    pub description: String,
}

impl MaintenanceItem {
    fn new(
        id: &str,
        component: &str,
        kind: MaintenanceKind,
        priority: MaintenancePriority,
        due_in: &str,
        condition: u8,
        description: String,
    ) -> Self {
        Self {
            id: id.to_string(),
            component: component.to_string(),
            kind,
            priority,
            due_in: due_in.to_string(),
            condition,
            description,
        }
    }
}

pub fn maintenance_plan(motor: &MotorHealth, power: &PowerSupply) -> Vec<MaintenanceItem> {
    vec![
        bearing_item(motor),
        winding_item(motor),
        supply_item(power),
        MaintenanceItem::new(
            "M-004",
            "Pt100 Sensor",
            MaintenanceKind::Preventive,
            MaintenancePriority::Low,
            "3 months",
            92,
            "Scheduled preventive calibration - last calibrated 2 months ago".to_string(),
        ),
        MaintenanceItem::new(
            "M-005",
            "Reactor Seal",
            MaintenanceKind::Preventive,
            MaintenancePriority::Medium,
            "2 weeks",
            78,
            "Visual inspection required - 2456h of operation since last replacement".to_string(),
        ),
        MaintenanceItem::new(
            "M-006",
            "Discharge Valve",
            MaintenanceKind::Preventive,
            MaintenancePriority::Low,
            "1 month",
            88,
            "Scheduled operational test - nominal operation".to_string(),
        ),
    ]
}

fn bearing_item(motor: &MotorHealth) -> MaintenanceItem {
    let (priority, due_in) = if motor.bearing_condition < 75.0 {
        (MaintenancePriority::High, "< 48h")
    } else if motor.bearing_condition < 85.0 {
        (MaintenancePriority::Medium, "1-2 weeks")
    } else {
        (MaintenancePriority::Low, "1 month")
    };

    MaintenanceItem::new(
        "M-001",
        "Motor Bearing",
        MaintenanceKind::Predictive,
        priority,
        due_in,
        motor.bearing_condition.clamp(0.0, 100.0).round() as u8,
        format!(
            "Current condition: {}% - vibration analysis: {} mm/s",
            motor.bearing_condition, motor.vibration_level
        ),
    )
}

fn winding_item(motor: &MotorHealth) -> MaintenanceItem {
    let (priority, due_in) = if motor.temperature > 65.0 {
        (MaintenancePriority::High, "< 24h")
    } else if motor.temperature > 55.0 {
        (MaintenancePriority::Medium, "2 weeks")
    } else {
        (MaintenancePriority::Low, "2 weeks")
    };
    let condition = (100.0 - (motor.temperature - 40.0) * 2.0).round().clamp(0.0, 100.0);

    MaintenanceItem::new(
        "M-002",
        "Motor Winding",
        MaintenanceKind::Predictive,
        priority,
        due_in,
        condition as u8,
        format!(
            "Winding temperature: {}C - insulation resistance: {} MOhm",
            motor.temperature, motor.insulation_resistance
        ),
    )
}

fn supply_item(power: &PowerSupply) -> MaintenanceItem {
    let (kind, priority, due_in, condition) = match power.status {
        PowerStatus::Critical => (
            MaintenanceKind::Corrective,
            MaintenancePriority::High,
            "Immediate",
            40,
        ),
        PowerStatus::Fluctuating => (
            MaintenanceKind::Preventive,
            MaintenancePriority::Medium,
            "3 months",
            70,
        ),
        PowerStatus::Stable => (
            MaintenanceKind::Preventive,
            MaintenancePriority::Low,
            "3 months",
            95,
        ),
    };

    MaintenanceItem::new(
        "M-003",
        "Power Supply",
        kind,
        priority,
        due_in,
        condition,
        format!(
            "Voltage: {}V / THD: {}% / PF: {}",
            power.voltage, power.thd, power.power_factor
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::equipment::MotorStatus;

    fn motor(bearing_condition: f64, temperature: f64) -> MotorHealth {
        MotorHealth {
            temperature,
            current_draw: 12.0,
            vibration_level: 2.4,
            bearing_condition,
            insulation_resistance: 150.0,
            runtime: 2460.0,
            status: MotorStatus::Healthy,
        }
    }

    fn power(voltage: f64) -> PowerSupply {
        PowerSupply {
            voltage,
            current: 18.0,
            frequency: 50.0,
            power_factor: 0.92,
            thd: 3.5,
            status: PowerStatus::from_voltage(voltage),
        }
    }

    #[test]
    fn test_bearing_priority_thresholds() {
        let high = maintenance_plan(&motor(74.0, 50.0), &power(380.0));
        assert_eq!(high[0].priority, MaintenancePriority::High);
        assert_eq!(high[0].due_in, "< 48h");
        assert_eq!(high[0].condition, 74);

        let medium = maintenance_plan(&motor(80.0, 50.0), &power(380.0));
        assert_eq!(medium[0].priority, MaintenancePriority::Medium);

        let low = maintenance_plan(&motor(85.0, 50.0), &power(380.0));
        assert_eq!(low[0].priority, MaintenancePriority::Low);
    }

    #[test]
    fn test_winding_priority_and_condition() {
        let plan = maintenance_plan(&motor(90.0, 66.0), &power(380.0));
        assert_eq!(plan[1].priority, MaintenancePriority::High);
        assert_eq!(plan[1].due_in, "< 24h");
        assert_eq!(plan[1].condition, 48);

        let plan = maintenance_plan(&motor(90.0, 60.0), &power(380.0));
        assert_eq!(plan[1].priority, MaintenancePriority::Medium);

        let plan = maintenance_plan(&motor(90.0, 30.0), &power(380.0));
        assert_eq!(plan[1].priority, MaintenancePriority::Low);
        assert_eq!(plan[1].condition, 100);
    }

    #[test]
    fn test_supply_item_follows_power_status() {
        let critical = maintenance_plan(&motor(90.0, 50.0), &power(355.0));
        assert_eq!(critical[2].kind, MaintenanceKind::Corrective);
        assert_eq!(critical[2].priority, MaintenancePriority::High);
        assert_eq!(critical[2].condition, 40);

        let fluctuating = maintenance_plan(&motor(90.0, 50.0), &power(393.0));
        assert_eq!(fluctuating[2].priority, MaintenancePriority::Medium);
        assert_eq!(fluctuating[2].condition, 70);

        let stable = maintenance_plan(&motor(90.0, 50.0), &power(380.0));
        assert_eq!(stable[2].priority, MaintenancePriority::Low);
        assert_eq!(stable[2].condition, 95);
    }

    #[test]
    fn test_plan_has_six_items() {
        let plan = maintenance_plan(&motor(90.0, 50.0), &power(380.0));
        let ids: Vec<_> = plan.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["M-001", "M-002", "M-003", "M-004", "M-005", "M-006"]);
    }
}
