//! Demo society data loaded into a fresh [`Store`].

use chrono::{Duration, NaiveDate};
use shared_types::*;
use std::collections::HashSet;

use crate::db::Store;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_default()
}

fn s(v: &str) -> String {
    v.to_string()
}

fn user(id: &str, name: &str, email: &str, role: Role, flat: Option<&str>, contact: &str) -> User {
    User {
        id: s(id),
        name: s(name),
        email: s(email),
        role,
        avatar: format!("https://i.pravatar.cc/150?u={}", role.as_str().to_lowercase()),
        flat_no: flat.map(s),
        contact: Some(s(contact)),
    }
}

fn users() -> Vec<User> {
    vec![
        user("user-1", "Admin User", "admin@auraliva.com", Role::Admin, None, "9876543210"),
        user("user-2", "Society Secretary", "secretary@auraliva.com", Role::Secretary, None, "9876543211"),
        user("user-3", "Society Treasurer", "treasurer@auraliva.com", Role::Treasurer, None, "9876543212"),
        user("user-4", "Security Head", "security@auraliva.com", Role::Security, None, "9876543213"),
        user("user-5", "John Doe", "john.doe@auraliva.com", Role::Resident, Some("A-101"), "9876543214"),
    ]
}

fn resident(id: &str, name: &str, wing: &str, flat: &str, contact: &str, status: ResidentStatus) -> Resident {
    Resident {
        id: s(id),
        name: s(name),
        wing: s(wing),
        flat_no: s(flat),
        contact: s(contact),
        status,
        tenant: None,
    }
}

fn residents() -> Vec<Resident> {
    let mut john = resident("res-jd", "John Doe", "A", "A-101", "9876543214", ResidentStatus::Active);
    john.tenant = Some(Tenant {
        id: s("ten-jd"),
        name: s("Priya Singh"),
        contact: s("8888888888"),
        move_in_date: date("2024-05-15"),
        move_out_date: None,
        agreement_doc: s("priya_agreement.pdf"),
        aadhaar_doc: s("priya_aadhaar.pdf"),
        pan_doc: s("priya_pan_card.pdf"),
        photo: s("priya_photo.jpg"),
        police_verification_doc: s("priya_police_verification.pdf"),
    });
    vec![
        john,
        resident("res-2", "Bob Williams", "B", "B-204", "9876543211", ResidentStatus::Active),
        resident("res-3", "Charlie Brown", "A", "A-302", "9876543212", ResidentStatus::Inactive),
        resident("res-4", "Diana Miller", "C", "C-101", "9876543213", ResidentStatus::Active),
        resident("res-5", "Ethan Davis", "B", "B-405", "9876543214", ResidentStatus::Active),
    ]
}

fn invoice(n: u32, name: &str, amount: f64, due: &str, status: InvoiceStatus) -> Invoice {
    Invoice {
        id: format!("inv-{n}"),
        invoice_number: format!("INV{n:03}"),
        resident_name: s(name),
        amount,
        due_date: date(due),
        status,
        payment_screenshot: None,
        fine: None,
    }
}

fn invoices() -> Vec<Invoice> {
    let mut diana = invoice(3, "Diana Miller", 5000.0, "2024-07-10", InvoiceStatus::Overdue);
    diana.fine = Some(250.0);
    let mut ethan = invoice(4, "Ethan Davis", 6000.0, "2024-08-10", InvoiceStatus::PendingVerification);
    ethan.payment_screenshot = Some(s("https://via.placeholder.com/400x800.png?text=Payment+Screenshot"));
    let mut john_overdue = invoice(6, "John Doe", 5000.0, "2024-07-10", InvoiceStatus::Overdue);
    john_overdue.fine = Some(250.0);
    vec![
        invoice(1, "Alice Johnson", 5000.0, "2024-08-10", InvoiceStatus::Paid),
        invoice(2, "Bob Williams", 5500.0, "2024-08-10", InvoiceStatus::Pending),
        diana,
        ethan,
        invoice(5, "John Doe", 5200.0, "2024-08-10", InvoiceStatus::Pending),
        john_overdue,
    ]
}

fn payments() -> Vec<Payment> {
    let pay = |id: &str, name: &str, amount: f64, on: &str, inv: &str, method| Payment {
        id: s(id),
        resident_name: s(name),
        amount,
        payment_date: date(on),
        invoice_number: s(inv),
        payment_method: method,
    };
    vec![
        pay("pay-1", "Alice Johnson", 5000.0, "2024-08-02", "INV001", PaymentMethod::CreditCard),
        pay("pay-2", "Charlie Brown", 4800.0, "2024-07-28", "INV-OLD-23", PaymentMethod::Upi),
        pay("pay-3", "Ethan Davis", 5500.0, "2024-07-25", "INV-OLD-21", PaymentMethod::BankTransfer),
        pay("pay-4", "Diana Miller", 5000.0, "2024-06-15", "INV-OLD-19", PaymentMethod::CreditCard),
    ]
}

fn expenses() -> Vec<Expense> {
    use ExpenseCategory::*;
    let rows: [(&str, &str, ExpenseCategory, &str, f64, &str, Option<&str>); 17] = [
        ("exp-jan-1", "2024-01-25", Utilities, "City Power Ltd.", 78000.0, "Electricity Bill", Some("jan-electric-bill.pdf")),
        ("exp-jan-2", "2024-01-31", StaffSalary, "Staff Salaries", 115000.0, "Salaries for Dec 2023", None),
        ("exp-feb-1", "2024-02-24", Utilities, "City Power Ltd.", 82000.0, "Electricity Bill", Some("feb-electric-bill.pdf")),
        ("exp-feb-2", "2024-02-29", StaffSalary, "Staff Salaries", 115000.0, "Salaries for Jan 2024", None),
        ("exp-mar-1", "2024-03-15", Maintenance, "Garden Services", 12000.0, "Landscaping", None),
        ("exp-mar-2", "2024-03-26", Utilities, "City Power Ltd.", 80000.0, "Electricity Bill", Some("mar-electric-bill.pdf")),
        ("exp-apr-1", "2024-04-25", Utilities, "City Power Ltd.", 95000.0, "Electricity Bill", Some("apr-electric-bill.pdf")),
        ("exp-apr-2", "2024-04-30", StaffSalary, "Staff Salaries", 120000.0, "Salaries for Mar 2024", None),
        ("exp-may-1", "2024-05-20", Maintenance, "Lift Maintenance Co.", 22000.0, "Annual Lift Service", Some("lift-service-may.pdf")),
        ("exp-may-2", "2024-05-26", Utilities, "City Power Ltd.", 105000.0, "Electricity Bill", Some("may-electric-bill.pdf")),
        ("exp-jun-1", "2024-06-25", Utilities, "City Power Ltd.", 110000.0, "Electricity Bill", Some("jun-electric-bill.pdf")),
        ("exp-jun-2", "2024-06-30", StaffSalary, "Staff Salaries", 120000.0, "Salaries for May 2024", None),
        ("exp-1", "2024-07-28", Maintenance, "Reliable Plumbing Co.", 15000.0, "Basement water leakage repair", Some("plumbing-invoice-782.pdf")),
        ("exp-2", "2024-07-30", Utilities, "City Power Ltd.", 85000.0, "Monthly electricity bill for common areas", Some("jul-electric-bill.pdf")),
        ("exp-3", "2024-08-01", StaffSalary, "Security & Housekeeping Staff", 120000.0, "Salaries for July 2024", None),
        ("exp-4", "2024-08-02", Event, "Decorations & Catering", 25000.0, "Advance for Independence Day celebration", None),
        ("exp-5", "2024-08-03", Miscellaneous, "Office Supplies Inc.", 3500.0, "Stationery for society office", Some("office-supplies-bill-aug.pdf")),
    ];
    rows.into_iter()
        .map(|(id, on, category, payee, amount, description, receipt)| Expense {
            id: s(id),
            date: date(on),
            category,
            payee: s(payee),
            amount,
            status: if id == "exp-4" {
                ExpenseStatus::PendingApproval
            } else {
                ExpenseStatus::Paid
            },
            description: s(description),
            receipt: receipt.map(s),
        })
        .collect()
}

fn quotation(
    id: &str,
    title: &str,
    description: &str,
    vendor: &str,
    amount: f64,
    file: &str,
    raised: &str,
    status: QuotationStatus,
) -> QuotationRequest {
    QuotationRequest {
        id: s(id),
        title: s(title),
        description: s(description),
        vendor_name: s(vendor),
        amount,
        quotation_file: s(file),
        raised_by: s("Society Secretary"),
        date_raised: date(raised),
        status,
        work_commence_date: None,
        work_commence_notes: None,
    }
}

fn quotations() -> Vec<QuotationRequest> {
    let mut paint = quotation(
        "quote-4",
        "Clubhouse Repainting",
        "Interior and exterior repainting of the society clubhouse.",
        "Perfect Painters",
        120000.0,
        "clubhouse_paint_quote.pdf",
        "2024-07-20",
        QuotationStatus::WorkCommenced,
    );
    paint.work_commence_date = Some(date("2024-08-05"));
    paint.work_commence_notes = Some(s(
        "Work will begin on Monday and is expected to take 2 weeks. Residents are requested to avoid the clubhouse area during this period.",
    ));
    vec![
        quotation(
            "quote-1",
            "Building A - Motor Repair",
            "Repair work for the main water motor of Building A, which has been malfunctioning.",
            "Reliable Pumps & Co.",
            45000.0,
            "motor_quote_A.pdf",
            "2024-07-28",
            QuotationStatus::PendingTreasurerApproval,
        ),
        quotation(
            "quote-2",
            "Playground Landscaping",
            "Annual landscaping and maintenance for the children's playground area.",
            "GreenScape Gardens",
            30000.0,
            "landscaping_quote.pdf",
            "2024-07-25",
            QuotationStatus::PendingCommitteeApproval,
        ),
        quotation(
            "quote-3",
            "CCTV Camera Upgrade",
            "Upgrade of 10 old CCTV cameras to new high-definition models for better security coverage.",
            "SecureTech Solutions",
            85000.0,
            "cctv_upgrade.pdf",
            "2024-07-22",
            QuotationStatus::CommitteeApproved,
        ),
        paint,
    ]
}

fn complaints() -> Vec<Complaint> {
    let c = |id: &str, title: &str, by: &str, on: &str, priority, status, description: &str| Complaint {
        id: s(id),
        title: s(title),
        raised_by: s(by),
        date: date(on),
        priority,
        status,
        description: s(description),
    };
    vec![
        c("com-1", "Water leakage in basement", "Alice Johnson (A-102)", "2024-07-28", ComplaintPriority::High, ComplaintStatus::Open,
            "There is a significant water leakage near the parking spot A-12."),
        c("com-2", "Playground light not working", "Bob Williams (B-204)", "2024-07-25", ComplaintPriority::Medium, ComplaintStatus::InProgress,
            "The main floodlight in the childrens playground is flickering and often turns off."),
        c("com-3", "Stray dogs creating nuisance", "Diana Miller (C-101)", "2024-07-22", ComplaintPriority::Low, ComplaintStatus::Resolved,
            "A pack of stray dogs has been entering the society at night."),
        c("com-4", "Lift not working in A-Wing", "John Doe (A-101)", "2024-07-30", ComplaintPriority::High, ComplaintStatus::Open,
            "The main lift in A-wing has been stuck since this morning."),
    ]
}

fn amenities() -> Vec<Amenity> {
    let a = |id: &str, name: &str, photo: &str, description: &str| Amenity {
        id: s(id),
        name: s(name),
        image: format!("https://images.unsplash.com/{photo}?q=80&w=800"),
        description: s(description),
    };
    vec![
        a("am-1", "Clubhouse", "photo-1574362848149-11496d93a7c4", "Spacious hall for parties and events."),
        a("am-2", "Gymnasium", "photo-1534438327276-14e5300c3a48", "Fully equipped with modern fitness machines."),
        a("am-3", "Swimming Pool", "photo-1560518883-ce09059eeffa", "Clean and well-maintained pool for all ages."),
        a("am-4", "Tennis Court", "photo-1596481921903-06675545a1c3", "Professional-grade court for tennis enthusiasts."),
    ]
}

fn notices() -> Vec<Notice> {
    let n = |id: &str, title: &str, on: &str, category, content: &str, by: &str| Notice {
        id: s(id),
        title: s(title),
        date: date(on),
        category,
        content: s(content),
        published_by: s(by),
    };
    vec![
        n("not-1", "Monthly Maintenance Bill", "2024-08-01", NoticeCategory::General,
            "Dear Residents, The maintenance bill for August 2024 has been generated. Please pay before the 10th to avoid late fees.", "Admin"),
        n("not-2", "Independence Day Celebration", "2024-07-30", NoticeCategory::Event,
            "We are excited to announce the Independence Day flag hoisting ceremony on August 15th at 9:00 AM in the society garden. All are invited.", "Secretary"),
        n("not-3", "Water Supply Disruption", "2024-07-29", NoticeCategory::Urgent,
            "Due to urgent pipeline repair work, water supply will be unavailable on July 31st from 10:00 AM to 5:00 PM. Kindly store water in advance.", "Admin"),
    ]
}

fn notifications() -> Vec<Notification> {
    let n = |id: &str, title: &str, message: &str, on: &str, read: bool, audience| Notification {
        id: s(id),
        title: s(title),
        message: s(message),
        date: date(on),
        read,
        audience,
        read_by: Default::default(),
    }
    .stored();
    vec![
        n("notif-1", "New Maintenance Invoice", "Invoice #INV005 for John Doe has been generated.", "2024-08-02", false, Audience::Admin),
        n("notif-2", "Complaint Resolved", "Complaint \"Stray dogs creating nuisance\" has been marked as resolved.", "2024-08-01", false, Audience::Secretary),
        n("notif-3", "Payment Received", "Payment of ₹5000 received from Alice Johnson.", "2024-08-01", true, Audience::Treasurer),
        n("notif-4", "Amenity Booking Confirmed", "Your booking for the Clubhouse on Aug 10th is confirmed.", "2024-07-31", false, Audience::Resident),
        n("notif-5", "High Priority Incident", "Suspicious individual reported near Gate 2.", "2024-07-31", false, Audience::Security),
        n("notif-6", "New Notice Published", "An urgent notice regarding water supply has been published.", "2024-07-29", true, Audience::All),
        n("notif-7", "Lift Maintenance", "The lift in A-wing will be under maintenance tomorrow.", "2024-07-28", false, Audience::Resident),
    ]
}

fn visitors() -> Vec<Visitor> {
    let v = |id: &str, name: &str, contact: &str, vehicle: &str, flat: &str, purpose: &str, in_time: &str, out_time: Option<&str>| Visitor {
        id: s(id),
        name: s(name),
        contact: s(contact),
        vehicle_no: s(vehicle),
        visiting_flat: s(flat),
        purpose: Some(s(purpose)),
        in_time: s(in_time),
        out_time: out_time.map(s),
        status: if out_time.is_some() {
            PresenceStatus::Exited
        } else {
            PresenceStatus::Inside
        },
    };
    vec![
        v("vis-1", "Ravi Sharma", "9123456780", "MH12AB1234", "A-101", "Personal Visit", "10:30 AM", Some("11:45 AM")),
        v("vis-2", "Priya Mehta", "9123456781", "MH14CD5678", "B-204", "Family Function", "12:15 PM", None),
        v("vis-3", "Delivery Agent", "9123456782", "MH12EF9012", "C-101", "Package Delivery", "02:00 PM", Some("02:10 PM")),
        v("vis-4", "Amit Singh", "9123456783", "MH14GH3456", "B-405", "Friend Visit", "03:30 PM", None),
    ]
}

fn patrols() -> Vec<Patrol> {
    let p = |id: &str, route: &str, guard: &str, start: Option<&str>, end: Option<&str>, status| Patrol {
        id: s(id),
        route_name: s(route),
        guard_name: s(guard),
        start_time: start.map(s),
        end_time: end.map(s),
        status,
    };
    vec![
        p("pat-1", "Night Round - Wings A & B", "Ram Singh", Some("11:05 PM"), Some("11:55 PM"), PatrolStatus::Completed),
        p("pat-2", "Perimeter Check", "Suresh Kumar", Some("02:30 PM"), None, PatrolStatus::InProgress),
        p("pat-3", "Morning Round - All Wings", "Ram Singh", None, None, PatrolStatus::Scheduled),
        p("pat-4", "Clubhouse & Pool Area", "Suresh Kumar", None, None, PatrolStatus::Scheduled),
    ]
}

fn incidents() -> Vec<Incident> {
    vec![
        Incident {
            id: s("inc-1"),
            title: s("Unauthorized Parking"),
            reported_by: s("Ram Singh"),
            date: date("2024-07-30"),
            time: s("09:15 PM"),
            severity: IncidentSeverity::Low,
            status: IncidentStatus::Resolved,
            description: s("Vehicle MH12AB1234 parked in non-designated area. Owner was notified and vehicle moved."),
        },
        Incident {
            id: s("inc-2"),
            title: s("Suspicious individual near Gate 2"),
            reported_by: s("Suresh Kumar"),
            date: date("2024-07-31"),
            time: s("11:00 AM"),
            severity: IncidentSeverity::Medium,
            status: IncidentStatus::UnderInvestigation,
            description: s("An unidentified person was seen loitering near the back gate. Fled when approached."),
        },
    ]
}

fn vehicles() -> Vec<Vehicle> {
    let v = |id: &str, no: &str, owner_type, owner: &str, flat: Option<&str>, in_time: &str| Vehicle {
        id: s(id),
        vehicle_no: s(no),
        owner_type,
        owner_name: s(owner),
        flat_no: flat.map(s),
        in_time: s(in_time),
        out_time: None,
        status: PresenceStatus::Inside,
    };
    vec![
        v("veh-1", "MH14CD5678", OwnerType::Visitor, "Priya Mehta", None, "12:15 PM"),
        v("veh-2", "MH14GH3456", OwnerType::Visitor, "Amit Singh", None, "03:30 PM"),
        v("veh-3", "MH04XY5555", OwnerType::Resident, "Alice Johnson", Some("A-102"), "08:00 AM"),
        v("veh-4", "MH02YZ6677", OwnerType::Resident, "Bob Williams", Some("B-204"), "09:12 AM"),
    ]
}

fn committee() -> Vec<CommitteeMember> {
    let m = |id: &str, name: &str, role: &str, contact: &str, seed: &str, children| CommitteeMember {
        id: s(id),
        name: s(name),
        role: s(role),
        contact: s(contact),
        avatar: format!("https://i.pravatar.cc/150?u={seed}"),
        children,
    };
    vec![m(
        "cm-1",
        "Mr. Sharma",
        "President",
        "9999988888",
        "president",
        vec![
            m(
                "user-2",
                "Society Secretary",
                "Secretary",
                "9876543211",
                "secretary",
                vec![
                    m("cm-4", "Member 1", "Committee Member", "9876541111", "member1", vec![]),
                    m("cm-5", "Member 2", "Committee Member", "9876542222", "member2", vec![]),
                ],
            ),
            m("user-3", "Society Treasurer", "Treasurer", "9876543212", "treasurer", vec![]),
        ],
    )]
}

impl Store {
    /// A store holding the demo society. `today` anchors the sample booking.
    pub fn seeded(today: NaiveDate) -> Self {
        Self {
            users: users(),
            residents: residents(),
            invoices: invoices(),
            payments: payments(),
            maintenance: MaintenanceConfig {
                monthly_amount: 5000.0,
                due_date_day: 10,
                late_fee: 250.0,
                late_fee_after_day: 15,
            },
            expenses: expenses(),
            quotations: quotations(),
            complaints: complaints(),
            amenities: amenities(),
            bookings: vec![Booking {
                id: s("booking-1"),
                amenity_id: s("am-3"),
                amenity_name: s("Swimming Pool"),
                date: today - Duration::days(3),
                time_slot: s("03:00 PM - 05:00 PM"),
                booked_by: s("user-5"),
            }],
            notices: notices(),
            notifications: notifications(),
            visitors: visitors(),
            patrols: patrols(),
            incidents: incidents(),
            vehicles: vehicles(),
            committee: committee(),
            poll: Poll::community(),
            poll_voters: HashSet::new(),
        }
    }
}
