//! Built-in records shown before the first successful sync.

use serde_json::{Value, json};

pub fn users() -> Vec<Value> {
    vec![
        json!({"id": 1, "name": "Rajesh Kumar", "email": "rajesh@kavyapharm.com", "role": "MANAGER", "phone": "9876543210", "territory": "North Zone", "status": "ACTIVE"}),
        json!({"id": 2, "name": "Priya Sharma", "email": "priya@kavyapharm.com", "role": "MR", "phone": "9876543211", "territory": "Delhi", "assignedManager": "Rajesh Kumar", "status": "ACTIVE"}),
        json!({"id": 3, "name": "Amit Singh", "email": "amit@kavyapharm.com", "role": "MR", "phone": "9876543212", "territory": "Noida", "assignedManager": "Rajesh Kumar", "status": "INACTIVE"}),
    ]
}

pub fn products() -> Vec<Value> {
    vec![
        json!({"id": 1001, "name": "Paracetamol 500mg", "category": "Pain Relief", "price": "\u{20B9}25.00", "stock": 150}),
        json!({"id": 1002, "name": "Amoxicillin 250mg", "category": "Antibiotic", "price": "\u{20B9}80.00", "stock": 45}),
        json!({"id": 1003, "name": "Cetirizine 10mg", "category": "Antihistamine", "price": "\u{20B9}30.00", "stock": 0}),
        json!({"id": 1004, "name": "Vitamin D3 1000IU", "category": "Supplement", "price": "\u{20B9}120.00", "stock": 300}),
    ]
}

pub fn targets() -> Vec<Value> {
    vec![
        json!({"id": 1, "mrId": 2, "mrName": "Priya Sharma", "productName": "Paracetamol 500mg", "targetUnits": 500, "achievedUnits": 410, "achievementPercentage": 82.0, "progressStatus": "Good", "assignedDate": "2024-01-01"}),
        json!({"id": 2, "mrId": 3, "mrName": "Amit Singh", "productName": "Vitamin D3 1000IU", "targetUnits": 300, "achievedUnits": 96, "achievementPercentage": 32.0, "progressStatus": "Poor", "assignedDate": "2024-01-01"}),
    ]
}

pub fn expenses() -> Vec<Value> {
    vec![
        json!({"id": 1, "mrName": "Priya Sharma", "category": "Travel", "amount": 1200.0, "description": "Client visits, Delhi", "expenseDate": "2024-01-15", "status": "PENDING"}),
        json!({"id": 2, "mrName": "Amit Singh", "category": "Meals", "amount": 450.0, "description": "Doctor lunch meeting", "expenseDate": "2024-01-16", "status": "APPROVED"}),
    ]
}

pub fn notifications() -> Vec<Value> {
    vec![
        json!({"id": "1", "title": "Monthly targets published", "message": "January targets are now visible on your dashboard.", "type": "info", "date": "2024-01-01", "status": "unread", "priority": "normal", "targetRole": "MR"}),
        json!({"id": "2", "title": "Expense approval pending", "message": "Two expense claims are waiting for review.", "type": "warning", "date": "2024-01-16", "status": "unread", "priority": "high", "targetRole": "MANAGER"}),
    ]
}

pub fn doctors() -> Vec<Value> {
    vec![
        json!({"id": 1, "name": "Dr. Anil Mehta", "type": "Consultant", "specialty": "Cardiology", "phone": "9811111111", "email": "anil.mehta@clinic.in", "clinicName": "Heart Care Clinic", "city": "Delhi", "assignedMR": "Priya Sharma", "status": "ACTIVE"}),
        json!({"id": 2, "name": "Dr. Sunita Rao", "type": "General Physician", "specialty": "General Medicine", "phone": "9822222222", "email": "sunita.rao@clinic.in", "clinicName": "City Health Centre", "city": "Noida", "assignedMR": "Amit Singh", "status": "ACTIVE"}),
    ]
}

pub fn tasks() -> Vec<Value> {
    vec![
        json!({"id": 1, "title": "Visit Heart Care Clinic", "type": "Doctor Visit", "assignedTo": "Priya Sharma", "priority": "High", "status": "Pending", "dueDate": "2024-01-20", "location": "Delhi", "clinicName": "Heart Care Clinic", "doctorName": "Dr. Anil Mehta"}),
        json!({"id": 2, "title": "Restock samples", "type": "Logistics", "assignedTo": "Amit Singh", "priority": "Medium", "status": "In Progress", "dueDate": "2024-01-22", "location": "Noida"}),
    ]
}

pub fn dcrs() -> Vec<Value> {
    vec![
        json!({"reportId": 1, "mrName": "Priya Sharma", "visitTitle": "Cardiology product detailing", "visitType": "Doctor Visit", "doctorId": "1", "doctorName": "Dr. Anil Mehta", "clinicLocation": "Heart Care Clinic, Delhi", "dateTime": "2024-01-15T10:30", "rating": "4", "remarks": "Interested in new formulation", "samplesGiven": [{"productName": "Paracetamol 500mg", "quantity": 10}]}),
    ]
}

pub fn distributions() -> Vec<Value> {
    vec![
        json!({"id": 1, "date": "2025-11-08", "product": "Diabetex 500mg", "mr": "Rajesh Kumar", "quantity": 10, "recipient": "Dr. Ramesh Gupta", "status": "completed"}),
        json!({"id": 2, "date": "2025-11-07", "product": "CardioCare 10mg", "mr": "Priya Sharma", "quantity": 15, "recipient": "MedPlus Pharmacy", "status": "completed"}),
        json!({"id": 3, "date": "2025-11-06", "product": "PainRelief 200mg", "mr": "Amit Singh", "quantity": 20, "recipient": "Dr. Vikram Singh", "status": "completed"}),
    ]
}

pub fn mr_stock() -> Vec<Value> {
    vec![
        json!({"id": "P001", "name": "Product X (500mg)", "stock": 100}),
        json!({"id": "P002", "name": "Product Y Syrup (100ml)", "stock": 100}),
        json!({"id": "P003", "name": "Product Z Cream", "stock": 100}),
        json!({"id": "P004", "name": "Sample Kit A", "stock": 100}),
    ]
}

pub fn stock_received() -> Vec<Value> {
    vec![
        json!({"id": 1, "productId": "P001", "quantity": 100, "date": "2025-11-01T09:00:00.000Z", "notes": "Initial batch Q4"}),
        json!({"id": 2, "productId": "P002", "quantity": 100, "date": "2025-11-01T09:00:00.000Z", "notes": "Initial batch Q4"}),
        json!({"id": 3, "productId": "P003", "quantity": 100, "date": "2025-11-01T09:00:00.000Z", "notes": "Initial batch Q4"}),
        json!({"id": 4, "productId": "P004", "quantity": 100, "date": "2025-11-01T09:00:00.000Z", "notes": "Initial batch Q4"}),
    ]
}

pub fn zones() -> Vec<Value> {
    vec![
        json!({"id": "Z001", "name": "Mumbai Zone", "description": "Mumbai metropolitan area and suburbs", "manager": "Rajesh Kumar", "status": "Active"}),
        json!({"id": "Z002", "name": "Delhi Zone", "description": "Delhi-NCR region including Gurgaon and Noida", "manager": "Priya Sharma", "status": "Active"}),
        json!({"id": "Z003", "name": "Bangalore Zone", "description": "Bangalore and surrounding districts", "manager": "Amit Singh", "status": "Active"}),
        json!({"id": "Z004", "name": "Chennai Zone", "description": "Chennai and Tamil Nadu region", "manager": "Suresh Reddy", "status": "Inactive"}),
    ]
}

pub fn territories() -> Vec<Value> {
    vec![
        json!({"id": "T001", "name": "Mumbai-North", "zone": "Mumbai Zone", "manager": "Vikram Patel", "mrCount": 5, "status": "Active"}),
        json!({"id": "T002", "name": "Mumbai-South", "zone": "Mumbai Zone", "manager": "Meera Joshi", "mrCount": 4, "status": "Active"}),
        json!({"id": "T003", "name": "Delhi-NCR", "zone": "Delhi Zone", "manager": "Rohit Verma", "mrCount": 6, "status": "Active"}),
        json!({"id": "T004", "name": "Bangalore-Central", "zone": "Bangalore Zone", "manager": "Kavita Rao", "mrCount": 3, "status": "Active"}),
        json!({"id": "T005", "name": "Chennai-Central", "zone": "Chennai Zone", "manager": "Arun Kumar", "mrCount": 2, "status": "Inactive"}),
    ]
}

pub fn regions() -> Vec<Value> {
    vec![
        json!({"id": "R001", "name": "West", "description": "Mumbai and Pune zones", "status": "Active"}),
        json!({"id": "R002", "name": "North", "description": "Delhi-NCR and Punjab zones", "status": "Active"}),
        json!({"id": "R003", "name": "South", "description": "Bangalore and Chennai zones", "status": "Active"}),
    ]
}
